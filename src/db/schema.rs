use rusqlite::Connection;

use crate::error::ContactsResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// Every child table references `contacts(id)` with `ON DELETE CASCADE`, so
/// deleting a contact removes its emails, phones, memberships and links.
/// Row order within a table (SQLite `rowid`) is insertion order and is what
/// listings and exports sort by.
pub fn initialize(conn: &Connection) -> ContactsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL DEFAULT '',
            address TEXT,
            birthday TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS contact_emails (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            email TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact_phones (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            phone TEXT NOT NULL,
            phone_type TEXT NOT NULL CHECK (phone_type IN ('Mobile', 'Telephone'))
        );

        CREATE TABLE IF NOT EXISTS contact_organizations (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            organization TEXT NOT NULL,
            designation TEXT,
            team TEXT,
            department TEXT,
            address TEXT
        );

        CREATE TABLE IF NOT EXISTS contact_urls (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            url TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact_social_links (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            url TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact_associated_names (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            name TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contact_emails_contact ON contact_emails(contact_id);
        CREATE INDEX IF NOT EXISTS idx_contact_phones_contact ON contact_phones(contact_id);
        CREATE INDEX IF NOT EXISTS idx_contact_organizations_contact ON contact_organizations(contact_id);
        CREATE INDEX IF NOT EXISTS idx_contact_urls_contact ON contact_urls(contact_id);
        CREATE INDEX IF NOT EXISTS idx_contact_social_links_contact ON contact_social_links(contact_id);
        CREATE INDEX IF NOT EXISTS idx_contact_associated_names_contact ON contact_associated_names(contact_id);

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
