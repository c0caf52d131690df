use crate::error::{PicError, PicResult};
use crate::model::{Contact, Id};

use super::ContactStore;

/// Contacts held in memory. Counts `save` calls so callers can check the
/// save-after-every-contact policy.
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: Vec<Contact>,
    saves: usize,
    reject_pictures: bool,
}

impl MemoryContactStore {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            saves: 0,
            reject_pictures: false,
        }
    }

    /// Make `set_picture` report failure, as a read-only store would.
    pub fn rejecting_pictures(mut self) -> Self {
        self.reject_pictures = true;
        self
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn get(&self, id: Id<Contact>) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }
}

impl ContactStore for MemoryContactStore {
    fn list_contacts(&self) -> PicResult<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    fn set_picture(&mut self, contact: &mut Contact, image_data: Vec<u8>) -> PicResult<bool> {
        if self.reject_pictures || image_data.is_empty() {
            return Ok(false);
        }
        contact.set_picture(image_data);
        Ok(true)
    }

    fn save(&mut self, contact: &mut Contact) -> PicResult<()> {
        let stored = self
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or_else(|| PicError::NotFound {
                entity_type: "Contact".into(),
                id: contact.id.to_string(),
            })?;
        contact.clear_pending();
        *stored = contact.clone();
        self.saves += 1;
        Ok(())
    }
}
