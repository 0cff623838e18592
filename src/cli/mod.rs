pub mod contact_commands;
pub mod export_commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;

use crate::config::Config;
use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, Id, PhoneType};
use crate::queries::contact_queries;

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "Contact manager with spreadsheet and CSV export")]
pub struct Cli {
    /// Database file path (overrides CONTACTS_DB_PATH)
    #[arg(short = 'f', long = "db", global = true)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all contacts
    List,
    /// Show one contact with all of its details
    Show { contact: String },
    /// Create a contact
    Add {
        first_name: String,
        last_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Add an email address to a contact
    AddEmail { contact: String, email: String },
    /// Add a phone number to a contact
    AddPhone {
        contact: String,
        number: String,
        #[arg(long = "type", value_enum, default_value_t = PhoneKind::Mobile)]
        phone_type: PhoneKind,
    },
    /// Add an organization membership to a contact
    AddOrg {
        contact: String,
        organization: String,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Add a website to a contact
    AddUrl { contact: String, url: String },
    /// Add a social profile link to a contact
    AddSocial { contact: String, url: String },
    /// Add an associated person's name to a contact
    AddAssociate { contact: String, name: String },
    /// Delete a contact and all of its details
    Delete { contact: String },
    /// List organization names in use
    Organizations,
    /// List team names in use
    Teams,
    /// Export contacts to a spreadsheet or CSV file
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,
        /// Organization to include (repeatable); omit or pass "all" for every organization
        #[arg(long = "org")]
        organizations: Vec<String>,
        /// Team to include (repeatable); omit for every team
        #[arg(long = "team")]
        teams: Vec<String>,
        /// Output file (defaults to contact-export.<ext> in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the response document (base64 file) instead of writing a file
        #[arg(long)]
        json: bool,
    },
    /// Import contacts from a JSON file
    Import { path: PathBuf },
    /// Read a business card photo and create a contact from it
    ScanCard {
        image: PathBuf,
        /// Save the scanned contact instead of only printing it
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhoneKind {
    Mobile,
    Telephone,
}

impl From<PhoneKind> for PhoneType {
    fn from(kind: PhoneKind) -> Self {
        match kind {
            PhoneKind::Mobile => PhoneType::Mobile,
            PhoneKind::Telephone => PhoneType::Telephone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl FormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatArg::Xlsx => "xlsx",
            FormatArg::Csv => "csv",
        }
    }
}

pub fn run(conn: &Connection, config: &Config, command: Command) -> ContactsResult<()> {
    match command {
        Command::List => contact_commands::list(conn),
        Command::Show { contact } => contact_commands::show(conn, &contact),
        Command::Add {
            first_name,
            last_name,
            address,
            birthday,
            notes,
        } => contact_commands::add(
            conn,
            &first_name,
            last_name.as_deref(),
            address.as_deref(),
            birthday,
            notes.as_deref(),
        ),
        Command::AddEmail { contact, email } => contact_commands::add_email(conn, &contact, &email),
        Command::AddPhone {
            contact,
            number,
            phone_type,
        } => contact_commands::add_phone(conn, &contact, &number, phone_type.into()),
        Command::AddOrg {
            contact,
            organization,
            designation,
            team,
            department,
            address,
        } => contact_commands::add_organization(
            conn,
            &contact,
            &organization,
            designation.as_deref(),
            team.as_deref(),
            department.as_deref(),
            address.as_deref(),
        ),
        Command::AddUrl { contact, url } => contact_commands::add_url(conn, &contact, &url),
        Command::AddSocial { contact, url } => contact_commands::add_social(conn, &contact, &url),
        Command::AddAssociate { contact, name } => {
            contact_commands::add_associate(conn, &contact, &name)
        }
        Command::Delete { contact } => contact_commands::delete(conn, &contact),
        Command::Organizations => contact_commands::organizations(conn),
        Command::Teams => contact_commands::teams(conn),
        Command::Export {
            format,
            organizations,
            teams,
            out,
            json,
        } => export_commands::export(conn, config, format, organizations, teams, out, json),
        Command::Import { path } => export_commands::import(conn, &path),
        Command::ScanCard { image, save } => export_commands::scan_card(conn, config, &image, save),
    }
}

/// Resolve a contact argument: a contact id, or a name query that must
/// match exactly one contact (an exact full-name match wins over partial
/// matches).
pub fn resolve_contact(conn: &Connection, arg: &str) -> ContactsResult<Contact> {
    let query = arg.trim();
    if let Ok(id) = Id::<Contact>::parse(query) {
        if let Some(contact) = contact_queries::get_contact(conn, id)? {
            return Ok(contact);
        }
    }

    let mut matches = contact_queries::find_by_name(conn, query)?;
    match matches.len() {
        0 => Err(ContactsError::NotFound {
            entity_type: "Contact".into(),
            id: query.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            if let Some(exact) = matches
                .iter()
                .find(|c| c.full_name().eq_ignore_ascii_case(query))
            {
                return Ok(exact.clone());
            }
            let names: Vec<String> = matches.iter().map(Contact::full_name).collect();
            Err(ContactsError::Other(format!(
                "Multiple contacts match '{}': {}. Please be more specific.",
                query,
                names.join(", ")
            )))
        }
    }
}
