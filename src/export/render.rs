use std::borrow::Cow;

use rust_xlsxwriter::Workbook;
use serde::Serialize;
use tracing::warn;

use super::request::FileType;
use crate::error::{ContactsError, ContactsResult};

/// Name of the single worksheet in a spreadsheet export.
pub const WORKSHEET_NAME: &str = "Contacts";

/// Default width applied to every spreadsheet column.
pub const DEFAULT_COLUMN_WIDTH: f64 = 25.0;

/// Longest string, in characters, a spreadsheet cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

/// One contact, flattened: every multi-valued field is a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Emails")]
    pub emails: String,
    #[serde(rename = "Phones")]
    pub phones: String,
    #[serde(rename = "Organizations")]
    pub organizations: String,
    #[serde(rename = "Designations")]
    pub designations: String,
    #[serde(rename = "Teams")]
    pub teams: String,
    #[serde(rename = "Departments")]
    pub departments: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Social Media")]
    pub social_media: String,
    #[serde(rename = "Birthday")]
    pub birthday: String,
    #[serde(rename = "Subordinates")]
    pub subordinates: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl ExportRow {
    pub const HEADERS: [&'static str; 14] = [
        "First Name",
        "Last Name",
        "Emails",
        "Phones",
        "Organizations",
        "Designations",
        "Teams",
        "Departments",
        "Address",
        "Website",
        "Social Media",
        "Birthday",
        "Subordinates",
        "Notes",
    ];

    /// Cell values in `HEADERS` order.
    pub fn cells(&self) -> [&str; 14] {
        [
            &self.first_name,
            &self.last_name,
            &self.emails,
            &self.phones,
            &self.organizations,
            &self.designations,
            &self.teams,
            &self.departments,
            &self.address,
            &self.website,
            &self.social_media,
            &self.birthday,
            &self.subordinates,
            &self.notes,
        ]
    }
}

pub fn render(rows: &[ExportRow], file_type: FileType, column_width: f64) -> ContactsResult<Vec<u8>> {
    match file_type {
        FileType::Xlsx => render_xlsx(rows, column_width),
        FileType::Csv => render_csv(rows),
    }
}

/// Header row followed by one record per contact. Header labels come from
/// the serde names on `ExportRow`.
pub fn render_csv(rows: &[ExportRow]) -> ContactsResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(ExportRow::HEADERS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ContactsError::Io(e.into_error()))
}

/// Single `Contacts` worksheet with a header row and fixed column widths.
pub fn render_xlsx(rows: &[ExportRow], column_width: f64) -> ContactsResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(WORKSHEET_NAME)?;

        for (col, header) in ExportRow::HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
            sheet.set_column_width(col as u16, column_width)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let line = (i + 1) as u32;
            for (col, value) in row.cells().into_iter().enumerate() {
                if !value.is_empty() {
                    let text = fit_cell(row, ExportRow::HEADERS[col], value);
                    sheet.write_string(line, col as u16, text.as_ref())?;
                }
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

/// Cut a value down to what one spreadsheet cell accepts. The csv export
/// keeps the full value.
fn fit_cell<'a>(row: &ExportRow, column: &str, value: &'a str) -> Cow<'a, str> {
    let length = value.chars().count();
    if length <= MAX_CELL_CHARS {
        return Cow::Borrowed(value);
    }
    let contact = format!("{} {}", row.first_name, row.last_name);
    warn!(
        contact = %contact.trim_end(),
        column,
        length,
        "truncating spreadsheet cell"
    );
    Cow::Owned(value.chars().take(MAX_CELL_CHARS).collect())
}
