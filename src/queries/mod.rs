pub mod contact_queries;
