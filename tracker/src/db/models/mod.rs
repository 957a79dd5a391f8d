//! Database record models matching table schemas.
//!
//! These structs are what the repositories in [`crate::db::handlers`] accept and
//! return. They are kept separate from the API models in [`crate::api::models`] so the
//! storage layout and the JSON contract can change independently.
//!
//! - [`habits`]: habit definitions
//! - [`weekly_tracks`]: per-date completion records
//! - [`monthly_tracks`]: per-(year, month, day) completion records

pub mod habits;
pub mod monthly_tracks;
pub mod weekly_tracks;
