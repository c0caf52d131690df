use rusqlite::{params, Connection};

use crate::error::PicResult;
use crate::model::{Contact, Id};

use super::social_repo;

pub fn insert(conn: &Connection, contact: &Contact) -> PicResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, first_name, last_name, picture) VALUES (?1, ?2, ?3, ?4)",
        params![
            contact.id.value.to_string(),
            contact.first_name,
            contact.last_name,
            contact.picture(),
        ],
    )?;

    for (position, address) in contact.emails.iter().enumerate() {
        conn.execute(
            "INSERT INTO contact_emails (contact_id, position, address) VALUES (?1, ?2, ?3)",
            params![contact.id.value.to_string(), position as i64, address],
        )?;
    }

    for profile in contact.social_profiles() {
        social_repo::upsert(conn, contact.id, profile)?;
    }
    Ok(())
}

pub fn update_picture(conn: &Connection, contact_id: Id<Contact>, picture: &[u8]) -> PicResult<()> {
    conn.execute(
        "UPDATE contacts SET picture = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![picture, contact_id.value.to_string()],
    )?;
    Ok(())
}

pub fn find_all(conn: &Connection) -> PicResult<Vec<Contact>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, picture FROM contacts
         ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE",
    )?;

    let rows = stmt
        .query_map([], |row| {
            let id_str: String = row.get(0)?;
            let first_name: String = row.get(1)?;
            let last_name: String = row.get(2)?;
            let picture: Option<Vec<u8>> = row.get(3)?;
            Ok((id_str, first_name, last_name, picture))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id_str, first_name, last_name, picture)| {
            let id = Id::parse(&id_str)?;
            Ok(Contact::restore(
                id,
                first_name,
                last_name,
                find_emails(conn, id)?,
                social_repo::find_by_contact(conn, id)?,
                picture,
            ))
        })
        .collect()
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> PicResult<Option<Contact>> {
    let result = conn.query_row(
        "SELECT first_name, last_name, picture FROM contacts WHERE id = ?1",
        params![id.value.to_string()],
        |row| {
            let first_name: String = row.get(0)?;
            let last_name: String = row.get(1)?;
            let picture: Option<Vec<u8>> = row.get(2)?;
            Ok((first_name, last_name, picture))
        },
    );

    match result {
        Ok((first_name, last_name, picture)) => Ok(Some(Contact::restore(
            id,
            first_name,
            last_name,
            find_emails(conn, id)?,
            social_repo::find_by_contact(conn, id)?,
            picture,
        ))),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn find_emails(conn: &Connection, contact_id: Id<Contact>) -> PicResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT address FROM contact_emails WHERE contact_id = ?1 ORDER BY position",
    )?;

    let emails = stmt
        .query_map(params![contact_id.value.to_string()], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(emails)
}
