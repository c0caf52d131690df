use std::path::Path;

use log::debug;

use super::{PictureProvider, ProviderKind};
use crate::error::{PicError, PicResult};
use crate::http::HttpClient;
use crate::model::Contact;

pub const DEFAULT_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Looks contacts up by the MD5 of each email address.
pub struct EmailHashProvider<H> {
    http: H,
    base_url: String,
}

impl<H: HttpClient> EmailHashProvider<H> {
    pub fn new(http: H) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: H, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lookup URL for `email`. `d=404` makes unknown addresses answer 404
    /// instead of a generated placeholder.
    pub fn lookup_url(&self, email: &str) -> String {
        format!("{}/{}?d=404", self.base_url, email_hash(email))
    }
}

/// Hex MD5 of the trimmed, lowercased address.
pub fn email_hash(email: &str) -> String {
    format!("{:x}", md5::compute(email.trim().to_lowercase().as_bytes()))
}

impl<H: HttpClient> PictureProvider for EmailHashProvider<H> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gravatar
    }

    fn get_image(&mut self, contact: &mut Contact, output_path: &Path) -> PicResult<bool> {
        for email in &contact.emails {
            if email.trim().is_empty() {
                continue;
            }

            let url = self.lookup_url(email);
            let response = self.http.get(&url)?;

            match response.status {
                404 => {
                    debug!("No gravatar for {}", email);
                }
                _ if response.is_success() => {
                    std::fs::write(output_path, &response.body)?;
                    debug!("Gravatar hit for {} ({} bytes)", email, response.body.len());
                    return Ok(true);
                }
                status => return Err(PicError::HttpStatus { url, status }),
            }
        }

        Ok(false)
    }
}
