//! HTTP request handlers for all API endpoints.
//!
//! Handlers extract path, query and body data, call the matching service on
//! [`crate::AppState`], and convert the result into a response. Business rules and
//! error classification live in the services.
//!
//! # Handler Modules
//!
//! - [`habits`]: habit CRUD
//! - [`weekly`]: per-date completion records
//! - [`monthly`]: per-day completion records

pub mod habits;
pub mod monthly;
pub mod weekly;
