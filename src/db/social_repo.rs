use rusqlite::{params, Connection};

use crate::error::PicResult;
use crate::model::{Contact, Id, SocialProfile};

pub fn upsert(conn: &Connection, contact_id: Id<Contact>, profile: &SocialProfile) -> PicResult<()> {
    conn.execute(
        "INSERT INTO social_profiles (contact_id, service, url, username) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(contact_id, service) DO UPDATE SET url = excluded.url, username = excluded.username",
        params![
            contact_id.value.to_string(),
            profile.service.as_str(),
            profile.url,
            profile.username,
        ],
    )?;
    Ok(())
}

pub fn find_by_contact(conn: &Connection, contact_id: Id<Contact>) -> PicResult<Vec<SocialProfile>> {
    let mut stmt = conn.prepare(
        "SELECT service, url, username FROM social_profiles WHERE contact_id = ?1 ORDER BY service",
    )?;

    let rows = stmt
        .query_map(params![contact_id.value.to_string()], |row| {
            let service: String = row.get(0)?;
            let url: Option<String> = row.get(1)?;
            let username: Option<String> = row.get(2)?;
            Ok((service, url, username))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(service, url, username)| Ok(SocialProfile::new(service.parse()?, url, username)))
        .collect()
}
