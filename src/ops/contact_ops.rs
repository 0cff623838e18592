use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

use crate::db::contact_repo;
use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, Id};
use crate::validation::{self, trim_optional};

pub fn add_contact(
    conn: &Connection,
    first_name: &str,
    last_name: Option<&str>,
    address: Option<&str>,
    birthday: Option<NaiveDate>,
    notes: Option<&str>,
) -> ContactsResult<Contact> {
    let valid_first = validation::non_blank(first_name, "first name")?;

    let mut contact = Contact::create(valid_first, trim_optional(last_name).unwrap_or_default());
    contact.address = trim_optional(address);
    contact.birthday = birthday;
    contact.notes = trim_optional(notes);

    contact_repo::insert(conn, &contact)?;
    debug!(contact_id = %contact.id, "added contact");
    Ok(contact)
}

pub fn update_contact(
    conn: &Connection,
    contact_id: Id<Contact>,
    first_name: Option<&str>,
    last_name: Option<Option<&str>>,
    address: Option<Option<&str>>,
    birthday: Option<Option<NaiveDate>>,
    notes: Option<Option<&str>>,
) -> ContactsResult<Contact> {
    let mut updated = require_contact(conn, contact_id)?;

    if let Some(first) = first_name {
        updated.first_name = validation::non_blank(first, "first name")?;
    }
    if let Some(last) = last_name {
        updated.last_name = trim_optional(last).unwrap_or_default();
    }
    if let Some(addr) = address {
        updated.address = trim_optional(addr);
    }
    if let Some(bd) = birthday {
        updated.birthday = bd;
    }
    if let Some(n) = notes {
        updated.notes = trim_optional(n);
    }

    contact_repo::update(conn, &updated)?;
    Ok(updated)
}

/// Removes the contact and, through the schema cascade, all of its
/// emails, phones, memberships and links.
pub fn delete_contact(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<()> {
    if !contact_repo::delete(conn, contact_id)? {
        return Err(not_found(contact_id));
    }
    debug!(contact_id = %contact_id, "deleted contact");
    Ok(())
}

pub(crate) fn require_contact(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Contact> {
    contact_repo::find_by_id(conn, contact_id)?.ok_or_else(|| not_found(contact_id))
}

fn not_found(contact_id: Id<Contact>) -> ContactsError {
    ContactsError::NotFound {
        entity_type: "Contact".into(),
        id: contact_id.to_string(),
    }
}
