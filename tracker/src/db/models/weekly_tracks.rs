//! Database models for weekly completion tracking.

use crate::types::{HabitKey, TrackKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One habit's completion status on one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeeklyTrackDBResponse {
    pub track_key: TrackKey,
    pub habit_key: HabitKey,
    pub done_date: NaiveDate,
    pub status: bool,
}

/// Upsert keyed by (habit_key, done_date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTrackUpsertDBRequest {
    pub habit_key: HabitKey,
    pub done_date: NaiveDate,
    pub status: bool,
}
