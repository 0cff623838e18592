use chrono::NaiveDate;
use rusqlite::Connection;

use super::resolve_contact;
use crate::error::ContactsResult;
use crate::model::PhoneType;
use crate::ops::{contact_ops, detail_ops};
use crate::queries::contact_queries;

pub fn list(conn: &Connection) -> ContactsResult<()> {
    let contacts = contact_queries::all_contacts(conn)?;
    if contacts.is_empty() {
        println!("No contacts yet. Use 'add <first name>' to create one.");
        return Ok(());
    }
    println!("Contacts ({}):", contacts.len());
    for contact in &contacts {
        println!("  {}  {}", contact.id, contact.full_name());
    }
    Ok(())
}

pub fn show(conn: &Connection, arg: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let Some(details) = contact_queries::details_for(conn, contact.id)? else {
        return Ok(());
    };

    println!();
    println!("{}", details.contact.full_name());
    println!("Id: {}", details.contact.id);
    if let Some(address) = &details.contact.address {
        println!("Address: {}", address);
    }
    if let Some(birthday) = details.contact.birthday {
        println!("Birthday: {}", birthday.format("%B %-d, %Y"));
    }
    print_list("Emails", details.emails.iter().map(|e| e.email.clone()));
    print_list("Phones", details.phones.iter().map(|p| p.label()));
    print_list(
        "Organizations",
        details.organizations.iter().map(|o| {
            let mut line = o.organization.clone();
            let extras: Vec<&str> = [&o.designation, &o.team, &o.department]
                .into_iter()
                .filter_map(|v| v.as_deref())
                .collect();
            if !extras.is_empty() {
                line.push_str(&format!(" ({})", extras.join(" / ")));
            }
            line
        }),
    );
    print_list("Websites", details.urls.iter().map(|u| u.url.clone()));
    print_list("Social", details.social_links.iter().map(|s| s.url.clone()));
    print_list(
        "Associated",
        details.associated_names.iter().map(|a| a.name.clone()),
    );
    if let Some(notes) = &details.contact.notes {
        println!("Notes: {}", notes);
    }
    println!();
    Ok(())
}

fn print_list(label: &str, values: impl Iterator<Item = String>) {
    let values: Vec<String> = values.collect();
    if !values.is_empty() {
        println!("{}: {}", label, values.join(", "));
    }
}

pub fn add(
    conn: &Connection,
    first_name: &str,
    last_name: Option<&str>,
    address: Option<&str>,
    birthday: Option<NaiveDate>,
    notes: Option<&str>,
) -> ContactsResult<()> {
    let contact = contact_ops::add_contact(conn, first_name, last_name, address, birthday, notes)?;
    println!("Created contact: {} ({})", contact.full_name(), contact.id);
    Ok(())
}

pub fn add_email(conn: &Connection, arg: &str, email: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_email(conn, contact.id, email)?;
    println!("Added email {} to {}", entry.email, contact.full_name());
    Ok(())
}

pub fn add_phone(conn: &Connection, arg: &str, number: &str, phone_type: PhoneType) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_phone(conn, contact.id, number, phone_type)?;
    println!("Added phone {} to {}", entry.label(), contact.full_name());
    Ok(())
}

pub fn add_organization(
    conn: &Connection,
    arg: &str,
    organization: &str,
    designation: Option<&str>,
    team: Option<&str>,
    department: Option<&str>,
    address: Option<&str>,
) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_organization(
        conn,
        contact.id,
        organization,
        designation,
        team,
        department,
        address,
    )?;
    println!("Added {} to {}", contact.full_name(), entry.organization);
    Ok(())
}

pub fn add_url(conn: &Connection, arg: &str, url: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_url(conn, contact.id, url)?;
    println!("Added website {} to {}", entry.url, contact.full_name());
    Ok(())
}

pub fn add_social(conn: &Connection, arg: &str, url: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_social_link(conn, contact.id, url)?;
    println!("Added social link {} to {}", entry.url, contact.full_name());
    Ok(())
}

pub fn add_associate(conn: &Connection, arg: &str, name: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    let entry = detail_ops::add_associated_name(conn, contact.id, name)?;
    println!("Associated {} with {}", entry.name, contact.full_name());
    Ok(())
}

pub fn delete(conn: &Connection, arg: &str) -> ContactsResult<()> {
    let contact = resolve_contact(conn, arg)?;
    contact_ops::delete_contact(conn, contact.id)?;
    println!("Deleted {}", contact.full_name());
    Ok(())
}

pub fn organizations(conn: &Connection) -> ContactsResult<()> {
    let names = contact_queries::organization_names(conn)?;
    if names.is_empty() {
        println!("No organizations yet. Use 'add-org <contact> <organization>' to add one.");
    } else {
        println!("Organizations ({}):", names.len());
        for name in &names {
            let count = contact_queries::contacts_in_organization(conn, name)?.len();
            println!("  {} ({})", name, count);
        }
    }
    Ok(())
}

pub fn teams(conn: &Connection) -> ContactsResult<()> {
    let names = contact_queries::team_names(conn)?;
    if names.is_empty() {
        println!("No teams yet. Use 'add-org <contact> <organization> --team <team>' to add one.");
    } else {
        println!("Teams ({}):", names.len());
        for name in &names {
            let count = contact_queries::contacts_in_team(conn, name)?.len();
            println!("  {} ({})", name, count);
        }
    }
    Ok(())
}
