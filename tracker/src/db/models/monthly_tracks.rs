//! Database models for monthly completion tracking.

use crate::types::{HabitKey, TrackKey};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One habit's completion status on one (year, month, day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthlyTrackDBResponse {
    pub track_key: TrackKey,
    pub habit_key: HabitKey,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub status: bool,
}

/// Upsert keyed by (habit_key, year, month, day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrackUpsertDBRequest {
    pub habit_key: HabitKey,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub status: bool,
}

impl MonthlyTrackUpsertDBRequest {
    /// Build an upsert from a date that is already known to be valid
    pub fn for_date(habit_key: HabitKey, date: NaiveDate, status: bool) -> Self {
        Self {
            habit_key,
            year: date.year(),
            month: date.month() as i32,
            day: date.day() as i32,
            status,
        }
    }
}
