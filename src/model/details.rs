use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::ids::Id;

/// Kind of phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneType {
    Mobile,
    Telephone,
}

impl PhoneType {
    pub const ALL: &'static [PhoneType] = &[PhoneType::Mobile, PhoneType::Telephone];

    pub fn display_name(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "Mobile",
            PhoneType::Telephone => "Telephone",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Mobile" => Some(PhoneType::Mobile),
            "Telephone" => Some(PhoneType::Telephone),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn to_db_str(&self) -> &'static str {
        self.display_name()
    }

    /// Lenient parse for user and AI input ("mobile", "cell", "landline", ...).
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mobile" | "cell" | "cellular" => Some(PhoneType::Mobile),
            "telephone" | "phone" | "landline" | "office" | "work" => Some(PhoneType::Telephone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEmail {
    pub id: Id<ContactEmail>,
    pub contact_id: Id<Contact>,
    pub email: String,
}

impl ContactEmail {
    pub fn create(contact_id: Id<Contact>, email: String) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPhone {
    pub id: Id<ContactPhone>,
    pub contact_id: Id<Contact>,
    pub phone: String,
    pub phone_type: PhoneType,
}

impl ContactPhone {
    pub fn create(contact_id: Id<Contact>, phone: String, phone_type: PhoneType) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            phone,
            phone_type,
        }
    }

    /// Rendering used in listings and exports: `555-1234 (Mobile)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.phone, self.phone_type.display_name())
    }
}

/// Membership of a contact in an organization. Organization, team and
/// department are free text; two memberships refer to the same organization
/// when the strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactOrganization {
    pub id: Id<ContactOrganization>,
    pub contact_id: Id<Contact>,
    pub organization: String,
    pub designation: Option<String>,
    pub team: Option<String>,
    pub department: Option<String>,
    pub address: Option<String>,
}

impl ContactOrganization {
    pub fn create(contact_id: Id<Contact>, organization: String) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            organization,
            designation: None,
            team: None,
            department: None,
            address: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUrl {
    pub id: Id<ContactUrl>,
    pub contact_id: Id<Contact>,
    pub url: String,
}

impl ContactUrl {
    pub fn create(contact_id: Id<Contact>, url: String) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSocialLink {
    pub id: Id<ContactSocialLink>,
    pub contact_id: Id<Contact>,
    pub url: String,
}

impl ContactSocialLink {
    pub fn create(contact_id: Id<Contact>, url: String) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            url,
        }
    }
}

/// A subordinate or otherwise associated person, stored by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAssociatedName {
    pub id: Id<ContactAssociatedName>,
    pub contact_id: Id<Contact>,
    pub name: String,
}

impl ContactAssociatedName {
    pub fn create(contact_id: Id<Contact>, name: String) -> Self {
        Self {
            id: Id::generate(),
            contact_id,
            name,
        }
    }
}

/// A contact together with all of its child collections, each in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub contact: Contact,
    pub emails: Vec<ContactEmail>,
    pub phones: Vec<ContactPhone>,
    pub organizations: Vec<ContactOrganization>,
    pub urls: Vec<ContactUrl>,
    pub social_links: Vec<ContactSocialLink>,
    pub associated_names: Vec<ContactAssociatedName>,
}

impl ContactDetails {
    pub fn empty(contact: Contact) -> Self {
        Self {
            contact,
            emails: Vec::new(),
            phones: Vec::new(),
            organizations: Vec::new(),
            urls: Vec::new(),
            social_links: Vec::new(),
            associated_names: Vec::new(),
        }
    }
}
