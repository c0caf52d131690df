use rusqlite::Connection;

use crate::error::PicResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> PicResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            picture BLOB,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS contact_emails (
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            address TEXT NOT NULL,
            PRIMARY KEY (contact_id, position)
        );

        CREATE TABLE IF NOT EXISTS social_profiles (
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            service TEXT NOT NULL,
            url TEXT,
            username TEXT,
            PRIMARY KEY (contact_id, service)
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
