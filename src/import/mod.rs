use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::PicResult;
use crate::model::{Contact, SocialProfile, SocialService};
use crate::store::SqliteContactStore;
use crate::validation::{self, trim_optional};

/// One contact in an import file.
#[derive(Debug, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub linkedin: Option<ImportSocial>,
}

#[derive(Debug, Deserialize)]
pub struct ImportSocial {
    pub url: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub emails: usize,
    pub social_profiles: usize,
    pub skipped: usize,
}

/// Imports a JSON array of contacts into the store.
pub fn import_json(json_path: &Path, store: &SqliteContactStore) -> PicResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    import_str(&json_str, store)
}

pub fn import_str(json_str: &str, store: &SqliteContactStore) -> PicResult<ImportStats> {
    let records: Vec<ImportRecord> = serde_json::from_str(json_str)?;
    let mut stats = ImportStats::default();

    for record in records {
        match to_contact(record) {
            Some(contact) => {
                stats.emails += contact.emails.len();
                stats.social_profiles += contact.social_profiles().len();
                store.insert(&contact)?;
                stats.contacts += 1;
            }
            None => stats.skipped += 1,
        }
    }

    Ok(stats)
}

/// `None` for a record with no name and no usable email.
fn to_contact(record: ImportRecord) -> Option<Contact> {
    let mut contact = Contact::create(record.first_name.trim(), record.last_name.trim());

    for email in &record.emails {
        match validation::email_address(email) {
            Ok(email) => contact = contact.with_email(&email),
            Err(e) => warn!("Skipping email for {}: {}", contact.display_name(), e),
        }
    }

    if contact.is_anonymous() && contact.emails.is_empty() {
        return None;
    }

    if let Some(social) = record.linkedin {
        let url = trim_optional(social.url.as_deref());
        let username = trim_optional(social.username.as_deref());
        if url.is_some() || username.is_some() {
            contact = contact.with_social_profile(SocialProfile::new(SocialService::LinkedIn, url, username));
        }
    }

    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactStore;

    #[test]
    fn imports_contacts_with_emails_and_profiles() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let stats = import_str(
            r#"[
                {"first_name": " Jane ", "last_name": "Roe", "emails": ["jane@example.com", "  ", "nope"]},
                {"first_name": "John", "last_name": "Doe", "linkedin": {"url": "https://www.linkedin.com/in/jdoe/"}},
                {"first_name": "", "last_name": "", "emails": []}
            ]"#,
            &store,
        )
        .unwrap();

        assert_eq!(
            stats,
            ImportStats {
                contacts: 2,
                emails: 1,
                social_profiles: 1,
                skipped: 1
            }
        );

        let contacts = store.list_contacts().unwrap();
        let jane = contacts.iter().find(|c| c.first_name == "Jane").unwrap();
        assert_eq!(jane.emails, vec!["jane@example.com".to_string()]);
    }

    #[test]
    fn empty_social_record_is_not_imported() {
        let contact = to_contact(ImportRecord {
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            emails: vec![],
            linkedin: Some(ImportSocial {
                url: Some(" ".into()),
                username: None,
            }),
        })
        .unwrap();
        assert!(contact.social_profiles().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        assert!(import_str("{not json", &store).is_err());
    }
}
