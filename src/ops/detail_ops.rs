use rusqlite::Connection;

use super::contact_ops::require_contact;
use crate::db::detail_repo;
use crate::error::{ContactsError, ContactsResult};
use crate::model::{
    Contact, ContactAssociatedName, ContactEmail, ContactOrganization, ContactPhone,
    ContactSocialLink, ContactUrl, Id, PhoneType,
};
use crate::validation::{self, trim_optional};

pub fn add_email(conn: &Connection, contact_id: Id<Contact>, email: &str) -> ContactsResult<ContactEmail> {
    require_contact(conn, contact_id)?;
    let entry = ContactEmail::create(contact_id, validation::email(email, "email")?);
    detail_repo::insert_email(conn, &entry)?;
    Ok(entry)
}

pub fn add_phone(
    conn: &Connection,
    contact_id: Id<Contact>,
    number: &str,
    phone_type: PhoneType,
) -> ContactsResult<ContactPhone> {
    require_contact(conn, contact_id)?;
    let entry = ContactPhone::create(
        contact_id,
        validation::non_blank(number, "phone number")?,
        phone_type,
    );
    detail_repo::insert_phone(conn, &entry)?;
    Ok(entry)
}

pub fn add_organization(
    conn: &Connection,
    contact_id: Id<Contact>,
    organization: &str,
    designation: Option<&str>,
    team: Option<&str>,
    department: Option<&str>,
    address: Option<&str>,
) -> ContactsResult<ContactOrganization> {
    require_contact(conn, contact_id)?;
    let mut entry =
        ContactOrganization::create(contact_id, validation::non_blank(organization, "organization")?);
    entry.designation = trim_optional(designation);
    entry.team = trim_optional(team);
    entry.department = trim_optional(department);
    entry.address = trim_optional(address);
    detail_repo::insert_organization(conn, &entry)?;
    Ok(entry)
}

pub fn add_url(conn: &Connection, contact_id: Id<Contact>, url: &str) -> ContactsResult<ContactUrl> {
    require_contact(conn, contact_id)?;
    let entry = ContactUrl::create(contact_id, validation::web_url(url, "website")?);
    detail_repo::insert_url(conn, &entry)?;
    Ok(entry)
}

pub fn add_social_link(
    conn: &Connection,
    contact_id: Id<Contact>,
    url: &str,
) -> ContactsResult<ContactSocialLink> {
    require_contact(conn, contact_id)?;
    let entry = ContactSocialLink::create(contact_id, validation::web_url(url, "social link")?);
    detail_repo::insert_social_link(conn, &entry)?;
    Ok(entry)
}

pub fn add_associated_name(
    conn: &Connection,
    contact_id: Id<Contact>,
    name: &str,
) -> ContactsResult<ContactAssociatedName> {
    require_contact(conn, contact_id)?;
    let entry = ContactAssociatedName::create(contact_id, validation::non_blank(name, "name")?);
    detail_repo::insert_associated_name(conn, &entry)?;
    Ok(entry)
}

pub fn remove_email(conn: &Connection, id: Id<ContactEmail>) -> ContactsResult<()> {
    removed(detail_repo::delete_email(conn, id)?, "ContactEmail", id)
}

pub fn remove_phone(conn: &Connection, id: Id<ContactPhone>) -> ContactsResult<()> {
    removed(detail_repo::delete_phone(conn, id)?, "ContactPhone", id)
}

pub fn remove_organization(conn: &Connection, id: Id<ContactOrganization>) -> ContactsResult<()> {
    removed(detail_repo::delete_organization(conn, id)?, "ContactOrganization", id)
}

pub fn remove_url(conn: &Connection, id: Id<ContactUrl>) -> ContactsResult<()> {
    removed(detail_repo::delete_url(conn, id)?, "ContactUrl", id)
}

pub fn remove_social_link(conn: &Connection, id: Id<ContactSocialLink>) -> ContactsResult<()> {
    removed(detail_repo::delete_social_link(conn, id)?, "ContactSocialLink", id)
}

pub fn remove_associated_name(conn: &Connection, id: Id<ContactAssociatedName>) -> ContactsResult<()> {
    removed(detail_repo::delete_associated_name(conn, id)?, "ContactAssociatedName", id)
}

fn removed<T>(was_removed: bool, entity_type: &str, id: Id<T>) -> ContactsResult<()> {
    if was_removed {
        Ok(())
    } else {
        Err(ContactsError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        })
    }
}
