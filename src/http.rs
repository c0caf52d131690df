use std::io::Read;
use std::time::Duration;

use crate::error::{PicError, PicResult};

const USER_AGENT: &str = concat!("contact-pictures/", env!("CARGO_PKG_VERSION"));
const MAX_BODY_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET with redirect-following. Non-2xx statuses come back as
/// responses; only transport failures are errors.
pub trait HttpClient {
    fn get(&self, url: &str) -> PicResult<HttpResponse>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> PicResult<HttpResponse> {
        (**self).get(url)
    }
}

pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .redirects(5)
                .user_agent(USER_AGENT)
                .build(),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str) -> PicResult<HttpResponse> {
        let response = match self.agent.get(url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(t)) => {
                return Err(PicError::Http(format!("GET {} failed: {}", url, t)))
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut body)?;

        Ok(HttpResponse { status, body })
    }
}
