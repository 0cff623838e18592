pub mod ids;
pub mod contact;
pub mod details;

// Re-exports for convenience
pub use ids::Id;
pub use contact::Contact;
pub use details::{
    ContactAssociatedName, ContactDetails, ContactEmail, ContactOrganization, ContactPhone,
    ContactSocialLink, ContactUrl, PhoneType,
};
