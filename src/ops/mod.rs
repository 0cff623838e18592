pub mod contact_ops;
pub mod detail_ops;
