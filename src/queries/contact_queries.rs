use rusqlite::Connection;

use crate::db::{contact_repo, detail_repo, export_repo};
use crate::error::ContactsResult;
use crate::model::{Contact, ContactDetails, Id};

pub fn all_contacts(conn: &Connection) -> ContactsResult<Vec<Contact>> {
    contact_repo::find_all(conn)
}

pub fn find_by_name(conn: &Connection, query: &str) -> ContactsResult<Vec<Contact>> {
    contact_repo::find_by_name(conn, query.trim())
}

pub fn get_contact(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Option<Contact>> {
    contact_repo::find_by_id(conn, contact_id)
}

/// The contact with every child collection, or `None` if it doesn't exist.
pub fn details_for(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Option<ContactDetails>> {
    let contact = match contact_repo::find_by_id(conn, contact_id)? {
        Some(c) => c,
        None => return Ok(None),
    };

    Ok(Some(ContactDetails {
        contact,
        emails: detail_repo::find_emails(conn, contact_id)?,
        phones: detail_repo::find_phones(conn, contact_id)?,
        organizations: detail_repo::find_organizations(conn, contact_id)?,
        urls: detail_repo::find_urls(conn, contact_id)?,
        social_links: detail_repo::find_social_links(conn, contact_id)?,
        associated_names: detail_repo::find_associated_names(conn, contact_id)?,
    }))
}

/// Every contact with its collections, in creation order.
pub fn all_details(conn: &Connection) -> ContactsResult<Vec<ContactDetails>> {
    export_repo::fetch_all_details(conn)
}

/// Organization names to offer as export filter choices.
pub fn organization_names(conn: &Connection) -> ContactsResult<Vec<String>> {
    detail_repo::distinct_organization_names(conn)
}

/// Team names to offer as export filter choices.
pub fn team_names(conn: &Connection) -> ContactsResult<Vec<String>> {
    detail_repo::distinct_team_names(conn)
}

/// Contacts with at least one membership whose organization equals `name`.
pub fn contacts_in_organization(conn: &Connection, name: &str) -> ContactsResult<Vec<Contact>> {
    Ok(all_details(conn)?
        .into_iter()
        .filter(|d| d.organizations.iter().any(|o| o.organization == name))
        .map(|d| d.contact)
        .collect())
}

/// Contacts with at least one membership on team `name`.
pub fn contacts_in_team(conn: &Connection, name: &str) -> ContactsResult<Vec<Contact>> {
    Ok(all_details(conn)?
        .into_iter()
        .filter(|d| d.organizations.iter().any(|o| o.team.as_deref() == Some(name)))
        .map(|d| d.contact)
        .collect())
}
