//! Child collections of a contact. Each collection has the same shape of
//! access: insert one row, delete one row by its id, list rows for one
//! contact, and list every row (used by the per-collection export).
//! Listings are in insertion order.

use rusqlite::{params, Connection, Params, Row};

use super::parse_id;
use crate::error::{ContactsError, ContactsResult};
use crate::model::{
    Contact, ContactAssociatedName, ContactEmail, ContactOrganization, ContactPhone,
    ContactSocialLink, ContactUrl, Id, PhoneType,
};

// ---------------------------------------------------------------------------
// Emails
// ---------------------------------------------------------------------------

pub fn insert_email(conn: &Connection, email: &ContactEmail) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_emails (id, contact_id, email) VALUES (?1, ?2, ?3)",
        params![email.id.to_db(), email.contact_id.to_db(), email.email],
    )?;
    Ok(())
}

pub fn delete_email(conn: &Connection, id: Id<ContactEmail>) -> ContactsResult<bool> {
    delete_row(conn, "contact_emails", &id.to_db())
}

pub fn find_emails(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Vec<ContactEmail>> {
    query_rows(
        conn,
        "SELECT id, contact_id, email FROM contact_emails WHERE contact_id = ?1 ORDER BY rowid",
        params![contact_id.to_db()],
        row_to_email,
    )
}

pub fn all_emails(conn: &Connection) -> ContactsResult<Vec<ContactEmail>> {
    query_rows(
        conn,
        "SELECT id, contact_id, email FROM contact_emails ORDER BY rowid",
        [],
        row_to_email,
    )
}

fn row_to_email(row: &Row) -> ContactsResult<ContactEmail> {
    Ok(ContactEmail {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        email: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Phones
// ---------------------------------------------------------------------------

pub fn insert_phone(conn: &Connection, phone: &ContactPhone) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_phones (id, contact_id, phone, phone_type) VALUES (?1, ?2, ?3, ?4)",
        params![
            phone.id.to_db(),
            phone.contact_id.to_db(),
            phone.phone,
            phone.phone_type.to_db_str(),
        ],
    )?;
    Ok(())
}

pub fn delete_phone(conn: &Connection, id: Id<ContactPhone>) -> ContactsResult<bool> {
    delete_row(conn, "contact_phones", &id.to_db())
}

pub fn find_phones(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Vec<ContactPhone>> {
    query_rows(
        conn,
        "SELECT id, contact_id, phone, phone_type FROM contact_phones
         WHERE contact_id = ?1 ORDER BY rowid",
        params![contact_id.to_db()],
        row_to_phone,
    )
}

pub fn all_phones(conn: &Connection) -> ContactsResult<Vec<ContactPhone>> {
    query_rows(
        conn,
        "SELECT id, contact_id, phone, phone_type FROM contact_phones ORDER BY rowid",
        [],
        row_to_phone,
    )
}

fn row_to_phone(row: &Row) -> ContactsResult<ContactPhone> {
    let type_str: String = row.get(3)?;
    let phone_type = PhoneType::from_db_str(&type_str)
        .ok_or_else(|| ContactsError::Other(format!("Unknown phone type: {}", type_str)))?;

    Ok(ContactPhone {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        phone: row.get(2)?,
        phone_type,
    })
}

// ---------------------------------------------------------------------------
// Organization memberships
// ---------------------------------------------------------------------------

const ORGANIZATION_COLUMNS: &str =
    "id, contact_id, organization, designation, team, department, address";

pub fn insert_organization(conn: &Connection, org: &ContactOrganization) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_organizations
         (id, contact_id, organization, designation, team, department, address)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            org.id.to_db(),
            org.contact_id.to_db(),
            org.organization,
            org.designation,
            org.team,
            org.department,
            org.address,
        ],
    )?;
    Ok(())
}

pub fn delete_organization(conn: &Connection, id: Id<ContactOrganization>) -> ContactsResult<bool> {
    delete_row(conn, "contact_organizations", &id.to_db())
}

pub fn find_organizations(
    conn: &Connection,
    contact_id: Id<Contact>,
) -> ContactsResult<Vec<ContactOrganization>> {
    query_rows(
        conn,
        &format!(
            "SELECT {ORGANIZATION_COLUMNS} FROM contact_organizations
             WHERE contact_id = ?1 ORDER BY rowid"
        ),
        params![contact_id.to_db()],
        row_to_organization,
    )
}

pub fn all_organizations(conn: &Connection) -> ContactsResult<Vec<ContactOrganization>> {
    query_rows(
        conn,
        &format!("SELECT {ORGANIZATION_COLUMNS} FROM contact_organizations ORDER BY rowid"),
        [],
        row_to_organization,
    )
}

/// Distinct organization names, sorted.
pub fn distinct_organization_names(conn: &Connection) -> ContactsResult<Vec<String>> {
    distinct_strings(
        conn,
        "SELECT DISTINCT organization FROM contact_organizations ORDER BY organization",
    )
}

/// Distinct non-null team names, sorted.
pub fn distinct_team_names(conn: &Connection) -> ContactsResult<Vec<String>> {
    distinct_strings(
        conn,
        "SELECT DISTINCT team FROM contact_organizations WHERE team IS NOT NULL ORDER BY team",
    )
}

fn row_to_organization(row: &Row) -> ContactsResult<ContactOrganization> {
    Ok(ContactOrganization {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        organization: row.get(2)?,
        designation: row.get(3)?,
        team: row.get(4)?,
        department: row.get(5)?,
        address: row.get(6)?,
    })
}

// ---------------------------------------------------------------------------
// Websites
// ---------------------------------------------------------------------------

pub fn insert_url(conn: &Connection, url: &ContactUrl) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_urls (id, contact_id, url) VALUES (?1, ?2, ?3)",
        params![url.id.to_db(), url.contact_id.to_db(), url.url],
    )?;
    Ok(())
}

pub fn delete_url(conn: &Connection, id: Id<ContactUrl>) -> ContactsResult<bool> {
    delete_row(conn, "contact_urls", &id.to_db())
}

pub fn find_urls(conn: &Connection, contact_id: Id<Contact>) -> ContactsResult<Vec<ContactUrl>> {
    query_rows(
        conn,
        "SELECT id, contact_id, url FROM contact_urls WHERE contact_id = ?1 ORDER BY rowid",
        params![contact_id.to_db()],
        row_to_url,
    )
}

pub fn all_urls(conn: &Connection) -> ContactsResult<Vec<ContactUrl>> {
    query_rows(
        conn,
        "SELECT id, contact_id, url FROM contact_urls ORDER BY rowid",
        [],
        row_to_url,
    )
}

fn row_to_url(row: &Row) -> ContactsResult<ContactUrl> {
    Ok(ContactUrl {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        url: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Social links
// ---------------------------------------------------------------------------

pub fn insert_social_link(conn: &Connection, link: &ContactSocialLink) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_social_links (id, contact_id, url) VALUES (?1, ?2, ?3)",
        params![link.id.to_db(), link.contact_id.to_db(), link.url],
    )?;
    Ok(())
}

pub fn delete_social_link(conn: &Connection, id: Id<ContactSocialLink>) -> ContactsResult<bool> {
    delete_row(conn, "contact_social_links", &id.to_db())
}

pub fn find_social_links(
    conn: &Connection,
    contact_id: Id<Contact>,
) -> ContactsResult<Vec<ContactSocialLink>> {
    query_rows(
        conn,
        "SELECT id, contact_id, url FROM contact_social_links WHERE contact_id = ?1 ORDER BY rowid",
        params![contact_id.to_db()],
        row_to_social_link,
    )
}

pub fn all_social_links(conn: &Connection) -> ContactsResult<Vec<ContactSocialLink>> {
    query_rows(
        conn,
        "SELECT id, contact_id, url FROM contact_social_links ORDER BY rowid",
        [],
        row_to_social_link,
    )
}

fn row_to_social_link(row: &Row) -> ContactsResult<ContactSocialLink> {
    Ok(ContactSocialLink {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        url: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Associated names
// ---------------------------------------------------------------------------

pub fn insert_associated_name(
    conn: &Connection,
    associated: &ContactAssociatedName,
) -> ContactsResult<()> {
    conn.execute(
        "INSERT INTO contact_associated_names (id, contact_id, name) VALUES (?1, ?2, ?3)",
        params![
            associated.id.to_db(),
            associated.contact_id.to_db(),
            associated.name,
        ],
    )?;
    Ok(())
}

pub fn delete_associated_name(
    conn: &Connection,
    id: Id<ContactAssociatedName>,
) -> ContactsResult<bool> {
    delete_row(conn, "contact_associated_names", &id.to_db())
}

pub fn find_associated_names(
    conn: &Connection,
    contact_id: Id<Contact>,
) -> ContactsResult<Vec<ContactAssociatedName>> {
    query_rows(
        conn,
        "SELECT id, contact_id, name FROM contact_associated_names
         WHERE contact_id = ?1 ORDER BY rowid",
        params![contact_id.to_db()],
        row_to_associated_name,
    )
}

pub fn all_associated_names(conn: &Connection) -> ContactsResult<Vec<ContactAssociatedName>> {
    query_rows(
        conn,
        "SELECT id, contact_id, name FROM contact_associated_names ORDER BY rowid",
        [],
        row_to_associated_name,
    )
}

fn row_to_associated_name(row: &Row) -> ContactsResult<ContactAssociatedName> {
    Ok(ContactAssociatedName {
        id: parse_id(&row.get::<_, String>(0)?)?,
        contact_id: parse_id(&row.get::<_, String>(1)?)?,
        name: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn query_rows<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: fn(&Row) -> ContactsResult<T>,
) -> ContactsResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| Ok(map(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn delete_row(conn: &Connection, table: &str, id: &str) -> ContactsResult<bool> {
    let removed = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])?;
    Ok(removed > 0)
}

fn distinct_strings(conn: &Connection, sql: &str) -> ContactsResult<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let values = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}
