use std::fs;
use std::path::Path;

use log::{debug, error, info, warn};

use super::picture_ops::{apply_picture, find_picture, picture_cache_path};
use crate::error::PicResult;
use crate::model::Contact;
use crate::picture::ImageCodec;
use crate::providers::PictureProvider;
use crate::store::ContactStore;

/// What happened to one contact during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Updated,
    AlreadySet,
    NotFound,
    Skipped,
    Rejected,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: usize,
    pub already_set: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: ContactOutcome) {
        match outcome {
            ContactOutcome::Updated => self.updated += 1,
            ContactOutcome::AlreadySet => self.already_set += 1,
            ContactOutcome::NotFound => self.not_found += 1,
            ContactOutcome::Skipped => self.skipped += 1,
            ContactOutcome::Rejected => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.updated + self.already_set + self.not_found + self.skipped + self.failed
    }
}

/// Fill in missing pictures for every contact in `store`.
///
/// Failures are logged against the contact and never stop the run. The store
/// is saved after every contact, whatever happened to it.
pub fn process_contacts<S, C, P>(
    store: &mut S,
    codec: &C,
    providers: &mut [P],
    picture_dir: &Path,
) -> PicResult<RunSummary>
where
    S: ContactStore + ?Sized,
    C: ImageCodec + ?Sized,
    P: PictureProvider,
{
    fs::create_dir_all(picture_dir)?;

    let contacts = store.list_contacts()?;
    info!("Checking {} contacts", contacts.len());

    let mut summary = RunSummary::default();
    for mut contact in contacts {
        match process_contact(store, codec, providers, &mut contact, picture_dir) {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                error!("{}: {}", contact.display_name(), e);
                summary.failed += 1;
            }
        }

        if let Err(e) = store.save(&mut contact) {
            error!("Could not save {}: {}", contact.display_name(), e);
        }
    }

    Ok(summary)
}

pub fn process_contact<S, C, P>(
    store: &mut S,
    codec: &C,
    providers: &mut [P],
    contact: &mut Contact,
    picture_dir: &Path,
) -> PicResult<ContactOutcome>
where
    S: ContactStore + ?Sized,
    C: ImageCodec + ?Sized,
    P: PictureProvider,
{
    // Nameless contacts would all share one cache file.
    if contact.is_anonymous() {
        debug!("Skipping {}", contact.display_name());
        return Ok(ContactOutcome::Skipped);
    }

    let path = picture_cache_path(picture_dir, contact);
    if !find_picture(contact, &path, providers)? {
        if contact.has_picture() {
            return Ok(ContactOutcome::AlreadySet);
        }
        warn!("No picture found for {}", contact.display_name());
        return Ok(ContactOutcome::NotFound);
    }

    if apply_picture(store, codec, contact, &path)? {
        info!("Updated picture for {}", contact.display_name());
        Ok(ContactOutcome::Updated)
    } else {
        warn!("Contact store rejected the picture for {}", contact.display_name());
        Ok(ContactOutcome::Rejected)
    }
}
