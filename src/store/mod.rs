//! The contact store the pipeline reads from and writes pictures back to.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryContactStore;
pub use sqlite::SqliteContactStore;

use crate::error::PicResult;
use crate::model::Contact;

pub trait ContactStore {
    /// Every contact in the store, each with nothing pending.
    fn list_contacts(&self) -> PicResult<Vec<Contact>>;

    /// Install `image_data` as the contact's picture. Returns the store's
    /// verdict; the change is persisted by the next `save`.
    fn set_picture(&mut self, contact: &mut Contact, image_data: Vec<u8>) -> PicResult<bool>;

    /// Persist the contact's pending changes and clear them.
    fn save(&mut self, contact: &mut Contact) -> PicResult<()>;
}
