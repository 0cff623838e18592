use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::error::{ContactsError, ContactsResult};
use crate::model::PhoneType;
use crate::ops::{contact_ops, detail_ops};

/// A contact as it appears in an import document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportedContact {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<ImportedPhone>,
    #[serde(default)]
    pub organizations: Vec<ImportedOrganization>,
    #[serde(default)]
    pub websites: Vec<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    #[serde(default)]
    pub associated_names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportedPhone {
    pub number: String,
    /// "Mobile" or "Telephone" (case-insensitive); Mobile when absent.
    #[serde(default, rename = "type")]
    pub phone_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportedOrganization {
    pub organization: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub emails: usize,
    pub phones: usize,
    pub organizations: usize,
    pub websites: usize,
    pub social_links: usize,
    pub associated_names: usize,
}

pub fn import_file(conn: &Connection, path: &Path) -> ContactsResult<ImportStats> {
    let json = std::fs::read_to_string(path)?;
    import_json(conn, &json)
}

/// Imports a JSON array of contacts. All rows are written in one
/// transaction: a document that fails validation anywhere leaves the
/// database untouched.
pub fn import_json(conn: &Connection, json: &str) -> ContactsResult<ImportStats> {
    let contacts: Vec<ImportedContact> = serde_json::from_str(json)?;

    let tx = conn.unchecked_transaction()?;
    let mut stats = ImportStats::default();
    for (i, imported) in contacts.iter().enumerate() {
        import_contact(&tx, imported, &mut stats).map_err(|e| {
            ContactsError::Other(format!("Contact #{} ({}): {}", i + 1, imported.first_name, e))
        })?;
    }
    tx.commit()?;

    info!(
        contacts = stats.contacts,
        emails = stats.emails,
        phones = stats.phones,
        organizations = stats.organizations,
        "imported contacts"
    );
    Ok(stats)
}

fn import_contact(
    conn: &Connection,
    imported: &ImportedContact,
    stats: &mut ImportStats,
) -> ContactsResult<()> {
    let contact = contact_ops::add_contact(
        conn,
        &imported.first_name,
        imported.last_name.as_deref(),
        imported.address.as_deref(),
        imported.birthday,
        imported.notes.as_deref(),
    )?;
    stats.contacts += 1;

    for email in &imported.emails {
        detail_ops::add_email(conn, contact.id, email)?;
        stats.emails += 1;
    }
    for phone in &imported.phones {
        detail_ops::add_phone(conn, contact.id, &phone.number, parse_phone_type(phone)?)?;
        stats.phones += 1;
    }
    for org in &imported.organizations {
        detail_ops::add_organization(
            conn,
            contact.id,
            &org.organization,
            org.designation.as_deref(),
            org.team.as_deref(),
            org.department.as_deref(),
            org.address.as_deref(),
        )?;
        stats.organizations += 1;
    }
    for url in &imported.websites {
        detail_ops::add_url(conn, contact.id, url)?;
        stats.websites += 1;
    }
    for link in &imported.social_links {
        detail_ops::add_social_link(conn, contact.id, link)?;
        stats.social_links += 1;
    }
    for name in &imported.associated_names {
        detail_ops::add_associated_name(conn, contact.id, name)?;
        stats.associated_names += 1;
    }
    Ok(())
}

fn parse_phone_type(phone: &ImportedPhone) -> ContactsResult<PhoneType> {
    match phone.phone_type.as_deref() {
        None => Ok(PhoneType::Mobile),
        Some(label) => PhoneType::from_label(label).ok_or_else(|| ContactsError::InvalidFormat {
            field: "phone type".into(),
            value: label.to_string(),
        }),
    }
}
