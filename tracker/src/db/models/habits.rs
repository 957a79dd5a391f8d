//! Database models for habits.

use crate::types::HabitKey;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a new habit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCreateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
}

/// Full replacement of a habit's mutable fields. `created_at` is never part of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitUpdateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
}

/// Database representation of a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HabitDBResponse {
    pub habit_key: HabitKey,
    pub name: String,
    pub description: Option<String>,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
}
