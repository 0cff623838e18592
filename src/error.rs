use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} is not valid: {value}")]
    InvalidFormat { field: String, value: String },

    #[error("{field} cannot be empty")]
    EmptySet { field: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Export parameters that failed validation. Raised before any query runs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A well-formed export request whose filters matched nothing.
    #[error("No contacts found matching the criteria.")]
    NoContactsFound,

    #[error("Invalid configuration for {var}: {reason}")]
    InvalidConfig { var: String, reason: String },

    #[error("Card scan failed: {0}")]
    Scan(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    Other(String),
}

pub type ContactsResult<T> = Result<T, ContactsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_contacts_message_is_user_facing() {
        assert_eq!(
            ContactsError::NoContactsFound.to_string(),
            "No contacts found matching the criteria."
        );
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = ContactsError::NotFound {
            entity_type: "Contact".into(),
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Contact not found: abc");
    }
}
