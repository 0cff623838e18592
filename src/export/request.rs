use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ContactsError, ContactsResult};
use crate::validation;

/// Organization filter value meaning "every organization".
pub const ALL_ORGANIZATIONS: &str = "all";

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Xlsx,
    Csv,
}

impl FileType {
    pub const ALL: &'static [FileType] = &[FileType::Xlsx, FileType::Csv];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "xlsx" => Some(FileType::Xlsx),
            "csv" => Some(FileType::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Xlsx => "xlsx",
            FileType::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            FileType::Csv => "text/csv",
        }
    }

    pub fn file_name(&self) -> String {
        format!("contact-export.{}", self.extension())
    }
}

/// Export parameters as the caller sends them, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub file_type: String,
    pub organizations: Vec<String>,
    #[serde(default)]
    pub teams: Vec<String>,
}

impl ExportParams {
    pub fn new(file_type: &str, organizations: &[&str], teams: &[&str]) -> Self {
        Self {
            file_type: file_type.to_string(),
            organizations: organizations.iter().map(|s| s.to_string()).collect(),
            teams: teams.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a JSON request body. A body of the wrong shape is an
    /// `InvalidInput`, the same as a body with bad values.
    pub fn from_json(json: &str) -> ContactsResult<Self> {
        serde_json::from_str(json).map_err(|e| ContactsError::InvalidInput(e.to_string()))
    }

    /// Check every parameter and build the typed request. Nothing here
    /// touches the database.
    pub fn validate(&self) -> ContactsResult<ExportRequest> {
        let file_type = FileType::parse(self.file_type.trim()).ok_or_else(|| {
            ContactsError::InvalidInput(format!("unknown file type '{}'", self.file_type))
        })?;

        validation::non_empty_set(&self.organizations, "organizations").map_err(invalid)?;
        let organizations = name_set(&self.organizations, "organization")?;
        let organizations = if organizations.contains(ALL_ORGANIZATIONS) {
            None
        } else {
            Some(organizations)
        };

        let teams = if self.teams.is_empty() {
            None
        } else {
            Some(name_set(&self.teams, "team")?)
        };

        Ok(ExportRequest {
            file_type,
            filter: ExportFilter {
                organizations,
                teams,
            },
        })
    }
}

fn name_set(values: &[String], field: &str) -> ContactsResult<HashSet<String>> {
    values
        .iter()
        .map(|v| validation::non_blank(v, field).map_err(invalid))
        .collect()
}

fn invalid(err: ContactsError) -> ContactsError {
    ContactsError::InvalidInput(err.to_string())
}

/// Organization/team membership filter. `None` on either side means that
/// side is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub organizations: Option<HashSet<String>>,
    pub teams: Option<HashSet<String>>,
}

impl ExportFilter {
    /// A filter that lets every contact through.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<O, T>(organizations: Option<O>, teams: Option<T>) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            organizations: organizations.map(|o| o.into_iter().map(Into::into).collect()),
            teams: teams.map(|t| t.into_iter().map(Into::into).collect()),
        }
    }

    /// Decide one membership row. A missing organization or team never
    /// satisfies an active filter on that side.
    pub fn matches(&self, organization: Option<&str>, team: Option<&str>) -> bool {
        fn side(set: &Option<HashSet<String>>, value: Option<&str>) -> bool {
            match set {
                None => true,
                Some(set) => value.is_some_and(|v| set.contains(v)),
            }
        }
        side(&self.organizations, organization) && side(&self.teams, team)
    }
}

/// A validated export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub file_type: FileType,
    pub filter: ExportFilter,
}

impl ExportRequest {
    pub fn unfiltered(file_type: FileType) -> Self {
        Self {
            file_type,
            filter: ExportFilter::none(),
        }
    }
}
