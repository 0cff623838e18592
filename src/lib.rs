#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod error;
pub mod config;
pub mod validation;
pub mod model;
pub mod db;
pub mod ops;
pub mod queries;
pub mod export;
pub mod import;
pub mod ai;
pub mod cli;
