//! Service layer between the HTTP handlers and the repositories.
//!
//! Each service owns a clone of the connection pool and takes one pooled connection per
//! call. The tracking services also hold a [`HabitService`] for the habit listing they
//! expose.
//!
//! Toggles are a single upsert statement in autocommit mode. SQLite queues concurrent
//! writers on the busy timeout, and the foreign key on `habit_key` stands in for an
//! existence check: a violation means the habit is unknown.
//!
//! - [`HabitService`]: create, list, get, update, delete habits
//! - [`WeeklyService`]: per-date completion records
//! - [`MonthlyService`]: per-(year, month, day) completion records
//!
//! Services translate "missing row" into [`crate::errors::Error::NotFound`] and reject
//! malformed input with [`crate::errors::Error::BadRequest`] before touching the database.

pub mod habits;
pub mod monthly;
pub mod weekly;

pub use habits::HabitService;
pub use monthly::MonthlyService;
pub use weekly::WeeklyService;

use crate::db::errors::{ConstraintKind, DbError};
use crate::errors::Error;
use crate::types::{HabitKey, resource};

/// Map a failed tracking-row write for `habit_key` to a service error.
fn tracking_write_error(habit_key: HabitKey, err: DbError) -> Error {
    match err {
        DbError::Constraint {
            kind: ConstraintKind::ForeignKey,
            ..
        } => Error::not_found(resource::HABIT, habit_key),
        other => Error::Database(other),
    }
}
