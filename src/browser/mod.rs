//! A narrow view of a browser session: just the operations the social
//! provider drives.

pub mod webdriver;

pub use webdriver::WebDriverSession;

use std::fmt;
use std::time::Duration;

use crate::error::{PicError, PicResult};

/// Interval between polls in `BrowserSession::wait_for`.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How to find elements on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    Tag(String),
    Class(String),
}

impl Locator {
    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }

    pub fn tag(name: &str) -> Self {
        Locator::Tag(name.to_string())
    }

    pub fn class(name: &str) -> Self {
        Locator::Class(name.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::Tag(s) => write!(f, "tag <{}>", s),
            Locator::Class(s) => write!(f, "class .{}", s),
        }
    }
}

/// Opaque handle to an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

pub trait BrowserSession {
    fn navigate(&mut self, url: &str) -> PicResult<()>;

    fn current_url(&mut self) -> PicResult<String>;

    fn find_elements(&mut self, locator: &Locator) -> PicResult<Vec<ElementRef>>;

    fn attribute(&mut self, element: &ElementRef, name: &str) -> PicResult<Option<String>>;

    fn text(&mut self, element: &ElementRef) -> PicResult<String>;

    fn click(&mut self, element: &ElementRef) -> PicResult<()>;

    fn type_text(&mut self, element: &ElementRef, text: &str) -> PicResult<()>;

    /// Block for a fixed duration, e.g. while an overlay renders.
    fn pause(&mut self, duration: Duration);

    fn find_element(&mut self, locator: &Locator) -> PicResult<Option<ElementRef>> {
        Ok(self.find_elements(locator)?.into_iter().next())
    }

    /// Poll until `locator` matches, giving up after `timeout`.
    fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> PicResult<ElementRef> {
        let attempts = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);
        for attempt in 0..attempts {
            if let Some(element) = self.find_element(locator)? {
                return Ok(element);
            }
            if attempt + 1 < attempts {
                self.pause(POLL_INTERVAL);
            }
        }
        Err(PicError::ElementTimeout {
            locator: locator.to_string(),
        })
    }
}
