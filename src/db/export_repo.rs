use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{debug, warn};

use super::{contact_repo, detail_repo, parse_id};
use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, ContactDetails, Id, PhoneType};

/// One row of the multi-way LEFT JOIN: a contact crossed with one of each of
/// its child rows. Every child field is `None` when that collection is empty
/// for the contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJoinRow {
    pub contact_id: Id<Contact>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
    pub organization: Option<String>,
    pub designation: Option<String>,
    pub team: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_type: Option<PhoneType>,
    pub website: Option<String>,
    pub social_link: Option<String>,
    pub associated_name: Option<String>,
}

/// Runs the single fan-out query. Row count per contact is the product of
/// its non-empty collection sizes, so this grows multiplicatively; prefer
/// `fetch_all_details` when contacts carry many child rows.
pub fn fetch_join_rows(conn: &Connection) -> ContactsResult<Vec<ExportJoinRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.first_name, c.last_name, c.address, c.birthday, c.notes,
                o.organization, o.designation, o.team, o.department,
                e.email, p.phone, p.phone_type, u.url, s.url, a.name
         FROM contacts c
         LEFT JOIN contact_organizations o ON o.contact_id = c.id
         LEFT JOIN contact_emails e ON e.contact_id = c.id
         LEFT JOIN contact_phones p ON p.contact_id = c.id
         LEFT JOIN contact_urls u ON u.contact_id = c.id
         LEFT JOIN contact_social_links s ON s.contact_id = c.id
         LEFT JOIN contact_associated_names a ON a.contact_id = c.id
         ORDER BY c.rowid, o.rowid, e.rowid, p.rowid, u.rowid, s.rowid, a.rowid",
    )?;

    let rows = stmt
        .query_map([], |row| Ok(row_to_join_row(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), "fetched export join rows");
    Ok(rows)
}

/// Fetches contacts and each child collection with independent queries and
/// joins them in memory by contact id. Contacts keep creation order and each
/// collection keeps insertion order.
pub fn fetch_all_details(conn: &Connection) -> ContactsResult<Vec<ContactDetails>> {
    let mut details: Vec<ContactDetails> = contact_repo::find_all(conn)?
        .into_iter()
        .map(ContactDetails::empty)
        .collect();

    let index: HashMap<Id<Contact>, usize> = details
        .iter()
        .enumerate()
        .map(|(i, d)| (d.contact.id, i))
        .collect();

    let mut orphans = 0usize;
    let mut slot = |contact_id: Id<Contact>| -> Option<usize> {
        let found = index.get(&contact_id).copied();
        if found.is_none() {
            orphans += 1;
        }
        found
    };

    for email in detail_repo::all_emails(conn)? {
        if let Some(i) = slot(email.contact_id) {
            details[i].emails.push(email);
        }
    }
    for phone in detail_repo::all_phones(conn)? {
        if let Some(i) = slot(phone.contact_id) {
            details[i].phones.push(phone);
        }
    }
    for org in detail_repo::all_organizations(conn)? {
        if let Some(i) = slot(org.contact_id) {
            details[i].organizations.push(org);
        }
    }
    for url in detail_repo::all_urls(conn)? {
        if let Some(i) = slot(url.contact_id) {
            details[i].urls.push(url);
        }
    }
    for link in detail_repo::all_social_links(conn)? {
        if let Some(i) = slot(link.contact_id) {
            details[i].social_links.push(link);
        }
    }
    for name in detail_repo::all_associated_names(conn)? {
        if let Some(i) = slot(name.contact_id) {
            details[i].associated_names.push(name);
        }
    }

    if orphans > 0 {
        warn!(orphans, "skipped child rows referencing missing contacts");
    }
    debug!(contacts = details.len(), "fetched contact details per collection");
    Ok(details)
}

fn row_to_join_row(row: &rusqlite::Row) -> ContactsResult<ExportJoinRow> {
    let id_str: String = row.get(0)?;
    let birthday_str: Option<String> = row.get(4)?;
    let phone_type = match row.get::<_, Option<String>>(12)? {
        Some(s) => Some(
            PhoneType::from_db_str(&s)
                .ok_or_else(|| ContactsError::Other(format!("Unknown phone type: {}", s)))?,
        ),
        None => None,
    };

    Ok(ExportJoinRow {
        contact_id: parse_id(&id_str)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        birthday: birthday_str.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        notes: row.get(5)?,
        organization: row.get(6)?,
        designation: row.get(7)?,
        team: row.get(8)?,
        department: row.get(9)?,
        email: row.get(10)?,
        phone: row.get(11)?,
        phone_type,
        website: row.get(13)?,
        social_link: row.get(14)?,
        associated_name: row.get(15)?,
    })
}
