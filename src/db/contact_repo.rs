use rusqlite::{params, Connection};

use super::parse_id;
use crate::error::ContactsResult;
use crate::model::{Contact, Id};

const CONTACT_COLUMNS: &str = "id, first_name, last_name, address, birthday, notes";

pub fn insert(conn: &Connection, contact: &Contact) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, first_name, last_name, address, birthday, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            contact.id.to_db(),
            contact.first_name,
            contact.last_name,
            contact.address,
            contact.birthday.map(|d| d.to_string()),
            contact.notes,
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, contact: &Contact) -> ContactsResult<()> {
    conn.execute(
        "UPDATE contacts SET first_name = ?1, last_name = ?2, address = ?3, birthday = ?4,
         notes = ?5, updated_at = datetime('now')
         WHERE id = ?6",
        params![
            contact.first_name,
            contact.last_name,
            contact.address,
            contact.birthday.map(|d| d.to_string()),
            contact.notes,
            contact.id.to_db(),
        ],
    )?;
    Ok(())
}

/// Deletes the contact; child rows go with it through the cascade.
/// Returns whether a row was removed.
pub fn delete(conn: &Connection, id: Id<Contact>) -> ContactsResult<bool> {
    let removed = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id.to_db()])?;
    Ok(removed > 0)
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> ContactsResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_contact(row)));

    match result {
        Ok(contact) => Ok(Some(contact?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All contacts in creation order.
pub fn find_all(conn: &Connection) -> ContactsResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY rowid"
    ))?;

    let contacts = stmt
        .query_map([], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// Case-insensitive substring match on first name, last name, or
/// "first last".
pub fn find_by_name(conn: &Connection, query: &str) -> ContactsResult<Vec<Contact>> {
    let pattern = format!("%{}%", query.to_lowercase());
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts
         WHERE LOWER(first_name) LIKE ?1
            OR LOWER(last_name) LIKE ?1
            OR LOWER(first_name || ' ' || last_name) LIKE ?1
         ORDER BY first_name, last_name"
    ))?;

    let contacts = stmt
        .query_map(params![pattern], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub(crate) fn row_to_contact(row: &rusqlite::Row) -> ContactsResult<Contact> {
    let id_str: String = row.get(0)?;
    let birthday_str: Option<String> = row.get(4)?;

    Ok(Contact {
        id: parse_id(&id_str)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        birthday: birthday_str
            .and_then(|s| chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        notes: row.get(5)?,
    })
}
