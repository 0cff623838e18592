use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::FormatArg;
use crate::ai::card_scan;
use crate::config::Config;
use crate::error::ContactsResult;
use crate::export::{self, ExportParams, ALL_ORGANIZATIONS};
use crate::import;

pub fn export(
    conn: &Connection,
    config: &Config,
    format: FormatArg,
    organizations: Vec<String>,
    teams: Vec<String>,
    out: Option<PathBuf>,
    json: bool,
) -> ContactsResult<()> {
    let organizations = if organizations.is_empty() {
        vec![ALL_ORGANIZATIONS.to_string()]
    } else {
        organizations
    };
    let params = ExportParams {
        file_type: format.as_str().to_string(),
        organizations,
        teams,
    };
    let options = config.export_options();

    if json {
        let response = export::handle_export(conn, &params, &options);
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let request = params.validate()?;
    let file = export::export_contacts(conn, &request, &options)?;
    let path = out.unwrap_or_else(|| PathBuf::from(&file.file_name));
    std::fs::write(&path, &file.bytes)?;
    println!("Wrote {} ({} bytes, {})", path.display(), file.bytes.len(), file.mime_type);
    Ok(())
}

pub fn import(conn: &Connection, path: &Path) -> ContactsResult<()> {
    println!("Importing from {}...", path.display());
    let stats = import::import_file(conn, path)?;
    println!("Import complete!");
    println!("  Contacts: {}", stats.contacts);
    println!("  Emails: {}", stats.emails);
    println!("  Phones: {}", stats.phones);
    println!("  Organizations: {}", stats.organizations);
    println!("  Websites: {}", stats.websites);
    println!("  Social links: {}", stats.social_links);
    println!("  Associated names: {}", stats.associated_names);
    Ok(())
}

pub fn scan_card(conn: &Connection, config: &Config, image: &Path, save: bool) -> ContactsResult<()> {
    let bytes = std::fs::read(image)?;
    card_scan::check_ollama(config)?;

    println!("Scanning card with {} (local)...", config.card_model);
    let card = card_scan::scan_card(config, &bytes)?;
    println!("{}", serde_json::to_string_pretty(&card)?);

    if save {
        let contact = card.save(conn)?;
        println!("Created contact: {} ({})", contact.full_name(), contact.id);
    }
    Ok(())
}
