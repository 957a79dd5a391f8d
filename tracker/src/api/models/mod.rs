//! API request/response models.
//!
//! Field names are camelCase on the wire. Conversions from the database records in
//! [`crate::db::models`] live next to each response type.

pub mod habits;
pub mod tracking;
