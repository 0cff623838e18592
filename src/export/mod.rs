//! Contact export: filter contacts by organization/team membership, flatten
//! each contact's collections into one row, and serialize the rows as a
//! spreadsheet or CSV file.

pub mod aggregate;
pub mod render;
pub mod request;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::db::export_repo;
use crate::error::{ContactsError, ContactsResult};

pub use aggregate::{ContactAggregate, OrganizationEntry, OrderedSet, LIST_SEPARATOR};
pub use render::{ExportRow, DEFAULT_COLUMN_WIDTH, MAX_CELL_CHARS, WORKSHEET_NAME};
pub use request::{ExportFilter, ExportParams, ExportRequest, FileType, ALL_ORGANIZATIONS};

/// How contact data is read for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStrategy {
    /// One query per collection, joined in memory by contact id.
    #[default]
    PerCollection,
    /// One multi-way LEFT JOIN, aggregated row by row.
    JoinFanOut,
}

impl ExportStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "per-collection" | "per_collection" => Some(ExportStrategy::PerCollection),
            "join" | "fan-out" | "join-fan-out" => Some(ExportStrategy::JoinFanOut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub strategy: ExportStrategy,
    pub column_width: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            strategy: ExportStrategy::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// A rendered export, ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl ExportFile {
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

/// Read, filter, group and flatten. Fails with `NoContactsFound` when the
/// filter leaves nothing.
pub fn collect_rows(
    conn: &Connection,
    filter: &ExportFilter,
    strategy: ExportStrategy,
) -> ContactsResult<Vec<ExportRow>> {
    let aggregates = match strategy {
        ExportStrategy::PerCollection => {
            aggregate::aggregate_details(export_repo::fetch_all_details(conn)?, filter)
        }
        ExportStrategy::JoinFanOut => {
            aggregate::aggregate_join_rows(export_repo::fetch_join_rows(conn)?, filter)
        }
    };

    if aggregates.is_empty() {
        debug!(?filter, "export filter matched no contacts");
        return Err(ContactsError::NoContactsFound);
    }

    Ok(aggregates.iter().map(ContactAggregate::flatten).collect())
}

/// Produce the export file for a validated request.
pub fn export_contacts(
    conn: &Connection,
    request: &ExportRequest,
    options: &ExportOptions,
) -> ContactsResult<ExportFile> {
    let rows = collect_rows(conn, &request.filter, options.strategy)?;
    let bytes = render::render(&rows, request.file_type, options.column_width)?;

    info!(
        contacts = rows.len(),
        bytes = bytes.len(),
        file_type = request.file_type.extension(),
        "exported contacts"
    );

    Ok(ExportFile {
        bytes,
        file_name: request.file_type.file_name(),
        mime_type: request.file_type.mime_type(),
    })
}

/// Caller-facing result of an export: either the encoded file or a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportResponse {
    #[serde(rename_all = "camelCase")]
    File {
        file: String,
        file_name: String,
        mime_type: String,
    },
    Error {
        error: String,
    },
}

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input.";
pub const NO_CONTACTS_MESSAGE: &str = "No contacts found matching the criteria.";
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to export contacts.";

impl ExportResponse {
    pub fn from_result(result: ContactsResult<ExportFile>) -> Self {
        match result {
            Ok(file) => ExportResponse::File {
                file: file.to_base64(),
                file_name: file.file_name,
                mime_type: file.mime_type.to_string(),
            },
            Err(ContactsError::InvalidInput(reason)) => {
                debug!(%reason, "rejected export request");
                ExportResponse::error(INVALID_INPUT_MESSAGE)
            }
            Err(ContactsError::NoContactsFound) => ExportResponse::error(NO_CONTACTS_MESSAGE),
            Err(e) => {
                error!(error = %e, "contact export failed");
                ExportResponse::error(EXPORT_FAILED_MESSAGE)
            }
        }
    }

    fn error(message: &str) -> Self {
        ExportResponse::Error {
            error: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExportResponse::Error { .. })
    }
}

/// Validate raw parameters and run the export, reporting every outcome as
/// an `ExportResponse`. Validation happens before the database is touched.
pub fn handle_export(conn: &Connection, params: &ExportParams, options: &ExportOptions) -> ExportResponse {
    let result = params
        .validate()
        .and_then(|request| export_contacts(conn, &request, options));
    ExportResponse::from_result(result)
}

/// Same as `handle_export`, starting from a JSON request body.
pub fn handle_export_json(conn: &Connection, body: &str, options: &ExportOptions) -> ExportResponse {
    match ExportParams::from_json(body) {
        Ok(params) => handle_export(conn, &params, options),
        Err(e) => ExportResponse::from_result(Err(e)),
    }
}
