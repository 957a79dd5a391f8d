//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `SqliteConnection` (a pooled connection or an open
//! transaction), binds parameters, and returns records from [`crate::db::models`].
//!
//! # Available Repositories
//!
//! - [`Habits`]: habit definitions, implements [`Repository`]
//! - [`WeeklyTracks`]: per-date completion records
//! - [`MonthlyTracks`]: per-(year, month, day) completion records
//!
//! # Common Pattern
//!
//! ```ignore
//! use tracker::db::handlers::{Habits, Repository};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Habits::new(&mut tx);
//!
//!     let habits = repo.list(&()).await?;
//!
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod habits;
pub mod monthly_tracks;
pub mod repository;
pub mod weekly_tracks;

pub use habits::Habits;
pub use monthly_tracks::MonthlyTracks;
pub use repository::Repository;
pub use weekly_tracks::WeeklyTracks;
