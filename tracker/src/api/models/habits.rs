//! API request/response models for habits.

use crate::db::models::habits::{HabitCreateDBRequest, HabitDBResponse, HabitUpdateDBRequest};
use crate::types::HabitKey;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request body for creating a habit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitCreate {
    /// Display name, must not be blank
    #[schema(example = "Morning run")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "5k before breakfast")]
    pub description: Option<String>,
    /// Local date and time the habit starts; empty string or null for none
    #[serde(default, deserialize_with = "local_datetime")]
    #[schema(value_type = Option<String>, example = "2024-01-01T07:00")]
    pub start_date_time: Option<NaiveDateTime>,
    /// Local date and time the habit ends; must not precede the start
    #[serde(default, deserialize_with = "local_datetime")]
    #[schema(value_type = Option<String>, example = "2024-03-31T07:30")]
    pub end_date_time: Option<NaiveDateTime>,
}

/// Request body for updating a habit. Every mutable field is replaced.
///
/// Clients usually send back the object they fetched; `habitKey` and `createDate` are
/// accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    #[schema(example = "Evening run")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "local_datetime")]
    #[schema(value_type = Option<String>, example = "2024-01-01T19:00")]
    pub start_date_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "local_datetime")]
    #[schema(value_type = Option<String>, example = "2024-03-31T19:30")]
    pub end_date_time: Option<NaiveDateTime>,
}

/// A habit as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub habit_key: HabitKey,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "2024-01-01T07:00:00")]
    pub start_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2024-03-31T07:30:00")]
    pub end_date_time: Option<NaiveDateTime>,
    /// When the habit was created (set by the server)
    pub create_date: DateTime<Utc>,
}

impl From<HabitCreate> for HabitCreateDBRequest {
    fn from(create: HabitCreate) -> Self {
        Self {
            name: create.name.trim().to_string(),
            description: non_blank(create.description),
            start_at: create.start_date_time,
            end_at: create.end_date_time,
        }
    }
}

impl From<HabitUpdate> for HabitUpdateDBRequest {
    fn from(update: HabitUpdate) -> Self {
        Self {
            name: update.name.trim().to_string(),
            description: non_blank(update.description),
            start_at: update.start_date_time,
            end_at: update.end_date_time,
        }
    }
}

impl From<HabitDBResponse> for HabitResponse {
    fn from(db: HabitDBResponse) -> Self {
        Self {
            habit_key: db.habit_key,
            name: db.name,
            description: db.description,
            start_date_time: db.start_at,
            end_date_time: db.end_at,
            create_date: db.created_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Accepts `YYYY-MM-DDTHH:MM`, with optional seconds and fraction, as produced by HTML
/// `datetime-local` inputs. Empty strings and null both mean "not set".
fn local_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid local datetime '{raw}': {e}")))
}
