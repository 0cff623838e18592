pub mod schema;
pub mod contact_repo;
pub mod detail_repo;
pub mod export_repo;

use crate::error::{ContactsError, ContactsResult};
use crate::model::Id;

/// Parse a stored id column back into a typed id.
pub(crate) fn parse_id<T>(s: &str) -> ContactsResult<Id<T>> {
    Id::parse(s).map_err(|e| ContactsError::Other(format!("Invalid UUID: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contact;

    #[test]
    fn parse_id_reads_stored_form() {
        let id = Id::<Contact>::generate();
        assert_eq!(parse_id::<Contact>(&id.to_db()).unwrap(), id);
    }

    #[test]
    fn parse_id_reports_bad_column_value() {
        let err = parse_id::<Contact>("not-a-uuid").unwrap_err();
        assert!(err.to_string().starts_with("Invalid UUID"));
    }
}
