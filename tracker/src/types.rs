//! Common type definitions.
//!
//! All entity keys are SQLite integer row ids wrapped in type aliases so that
//! signatures say which table a key belongs to:
//!
//! - [`HabitKey`]: habit identifier
//! - [`TrackKey`]: weekly or monthly tracking record identifier

// Type aliases for keys
pub type HabitKey = i64;
pub type TrackKey = i64;

/// Resource names used in not-found errors and logs
pub mod resource {
    pub const HABIT: &str = "Habit";
}
