use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// A contact record. Child collections (emails, phones, organizations, ...)
/// live in their own tables and reference the contact by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id<Contact>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Contact {
    pub fn create(first_name: String, last_name: String) -> Self {
        Self {
            id: Id::generate(),
            first_name,
            last_name,
            address: None,
            birthday: None,
            notes: None,
        }
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}
