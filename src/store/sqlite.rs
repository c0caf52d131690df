use std::path::Path;

use log::debug;
use rusqlite::Connection;

use crate::db::{contact_repo, schema, social_repo};
use crate::error::{PicError, PicResult};
use crate::model::Contact;

use super::ContactStore;

pub struct SqliteContactStore {
    conn: Connection,
}

impl SqliteContactStore {
    pub fn open(path: &Path) -> PicResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> PicResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn insert(&self, contact: &Contact) -> PicResult<()> {
        contact_repo::insert(&self.conn, contact)
    }
}

impl ContactStore for SqliteContactStore {
    fn list_contacts(&self) -> PicResult<Vec<Contact>> {
        contact_repo::find_all(&self.conn)
    }

    fn set_picture(&mut self, contact: &mut Contact, image_data: Vec<u8>) -> PicResult<bool> {
        if image_data.is_empty() {
            return Ok(false);
        }
        contact.set_picture(image_data);
        Ok(true)
    }

    fn save(&mut self, contact: &mut Contact) -> PicResult<()> {
        if contact.pending_changes().is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        let pending = contact.pending_changes().clone();

        if pending.picture {
            let picture = contact.picture().ok_or_else(|| {
                PicError::Other(format!("{} has a pending picture with no data", contact.display_name()))
            })?;
            contact_repo::update_picture(&tx, contact.id, picture)?;
        }

        for service in &pending.social {
            if let Some(profile) = contact.social_profile(*service) {
                social_repo::upsert(&tx, contact.id, profile)?;
            }
        }

        tx.commit()?;
        debug!("Saved {} ({:?})", contact.display_name(), pending);
        contact.clear_pending();
        Ok(())
    }
}
