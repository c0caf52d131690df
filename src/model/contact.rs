use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::Id;
use crate::error::PicError;

/// A social network a contact can carry a profile record for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialService {
    LinkedIn,
}

impl SocialService {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialService::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for SocialService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialService {
    type Err = PicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linkedin" => Ok(SocialService::LinkedIn),
            other => Err(PicError::Other(format!("Unknown social service: {}", other))),
        }
    }
}

/// A stored social-profile record. Once resolved, `url` and `username`
/// both hold values that can be derived from one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub service: SocialService,
    pub url: Option<String>,
    pub username: Option<String>,
}

impl SocialProfile {
    pub fn new(service: SocialService, url: Option<String>, username: Option<String>) -> Self {
        Self {
            service,
            url,
            username,
        }
    }
}

/// Mutations made to a contact since it was loaded, persisted by
/// `ContactStore::save`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub picture: bool,
    pub social: Vec<SocialService>,
}

impl PendingChanges {
    pub fn is_empty(&self) -> bool {
        !self.picture && self.social.is_empty()
    }
}

/// A person in the contact store.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: Id<Contact>,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    social_profiles: Vec<SocialProfile>,
    picture: Option<Vec<u8>>,
    pending: PendingChanges,
}

impl Contact {
    pub fn create(first_name: &str, last_name: &str) -> Self {
        Self::restore(
            Id::generate(),
            first_name.to_string(),
            last_name.to_string(),
            Vec::new(),
            Vec::new(),
            None,
        )
    }

    /// Rebuild a contact from storage with nothing pending.
    pub fn restore(
        id: Id<Contact>,
        first_name: String,
        last_name: String,
        emails: Vec<String>,
        social_profiles: Vec<SocialProfile>,
        picture: Option<Vec<u8>>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            emails,
            social_profiles,
            picture,
            pending: PendingChanges::default(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.emails.push(email.to_string());
        self
    }

    pub fn with_social_profile(mut self, profile: SocialProfile) -> Self {
        self.social_profiles.retain(|p| p.service != profile.service);
        self.social_profiles.push(profile);
        self
    }

    pub fn with_picture(mut self, data: Vec<u8>) -> Self {
        self.picture = Some(data);
        self
    }

    /// "First Last", trimmed; empty when the contact has no name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn is_anonymous(&self) -> bool {
        self.first_name.trim().is_empty() && self.last_name.trim().is_empty()
    }

    /// Name used in log lines and error messages.
    pub fn display_name(&self) -> String {
        if self.is_anonymous() {
            format!("<unnamed {}>", self.id)
        } else {
            self.full_name()
        }
    }

    /// Existing picture bytes, ignoring an empty blob.
    pub fn picture(&self) -> Option<&[u8]> {
        self.picture.as_deref().filter(|p| !p.is_empty())
    }

    pub fn has_picture(&self) -> bool {
        self.picture().is_some()
    }

    pub fn set_picture(&mut self, data: Vec<u8>) {
        self.picture = Some(data);
        self.pending.picture = true;
    }

    pub fn social_profiles(&self) -> &[SocialProfile] {
        &self.social_profiles
    }

    pub fn social_profile(&self, service: SocialService) -> Option<&SocialProfile> {
        self.social_profiles.iter().find(|p| p.service == service)
    }

    pub fn set_social_profile(&mut self, profile: SocialProfile) {
        let service = profile.service;
        match self.social_profiles.iter_mut().find(|p| p.service == service) {
            Some(existing) => *existing = profile,
            None => self.social_profiles.push(profile),
        }
        if !self.pending.social.contains(&service) {
            self.pending.social.push(service);
        }
    }

    pub fn pending_changes(&self) -> &PendingChanges {
        &self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending = PendingChanges::default();
    }
}
