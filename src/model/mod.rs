//! Serde model of Managed Blockchain requests and responses
//!
//! The remote service owns these records. Fields are carried through as
//! returned, with enum values kept as the service's wire strings.

pub mod admin;
pub mod query;

pub use admin::*;
pub use query::*;
