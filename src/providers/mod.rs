//! Sources a missing contact picture can come from, tried in priority order.

pub mod gravatar;
pub mod linkedin;

pub use gravatar::EmailHashProvider;
pub use linkedin::SocialSearchProvider;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PicError, PicResult};
use crate::model::Contact;

pub trait PictureProvider {
    fn kind(&self) -> ProviderKind;

    /// Try to write an image for `contact` to `output_path`.
    ///
    /// `Ok(false)` means this provider has no picture for the contact, which
    /// is an ordinary outcome. Errors are transport, automation or data
    /// failures.
    fn get_image(&mut self, contact: &mut Contact, output_path: &Path) -> PicResult<bool>;
}

impl<P: PictureProvider + ?Sized> PictureProvider for Box<P> {
    fn kind(&self) -> ProviderKind {
        (**self).kind()
    }

    fn get_image(&mut self, contact: &mut Contact, output_path: &Path) -> PicResult<bool> {
        (**self).get_image(contact, output_path)
    }
}

/// The provider variants, in the spelling used by config files and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gravatar,
    LinkedIn,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gravatar, ProviderKind::LinkedIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gravatar => "gravatar",
            ProviderKind::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = PicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gravatar" => Ok(ProviderKind::Gravatar),
            "linkedin" => Ok(ProviderKind::LinkedIn),
            other => Err(PicError::Config(format!("Unknown provider: {}", other))),
        }
    }
}
