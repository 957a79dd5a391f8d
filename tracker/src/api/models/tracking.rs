//! API request/response models for weekly and monthly completion tracking.

use crate::db::models::{monthly_tracks::MonthlyTrackDBResponse, weekly_tracks::WeeklyTrackDBResponse};
use crate::types::{HabitKey, TrackKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const SUCCESS: &str = "success";

/// Optional inclusive date bounds for a habit's weekly records
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct WeeklyRangeQuery {
    /// First date to include (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2024-01-01")]
    pub from: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2024-01-07")]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct WeeklyToggleQuery {
    /// Calendar date to mark (YYYY-MM-DD)
    #[param(value_type = String, example = "2024-01-01")]
    pub date: NaiveDate,
    /// Whether the habit was completed on that date
    pub done: bool,
}

/// One weekly record. `done` carries the date, `status` the completion flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrackResponse {
    pub tm_key: TrackKey,
    pub habit_key: HabitKey,
    #[schema(value_type = String, example = "2024-01-01")]
    pub done: NaiveDate,
    pub status: bool,
}

/// Acknowledgement returned by a weekly toggle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyToggleResponse {
    #[schema(example = "success")]
    pub status: String,
    pub habit_key: HabitKey,
    #[schema(value_type = String, example = "2024-01-01")]
    pub date: NaiveDate,
    pub done: bool,
}

/// Optional year, or year and month, to narrow a habit's monthly records
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthlyRangeQuery {
    #[param(example = 2024)]
    pub year: Option<i32>,
    /// 1-12, requires `year`
    #[param(example = 1)]
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthlyToggleQuery {
    #[param(example = 2024)]
    pub year: i32,
    #[param(example = 2)]
    pub month: u32,
    #[param(example = 29)]
    pub day: u32,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrackResponse {
    pub tm_key: TrackKey,
    pub habit_key: HabitKey,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub status: bool,
}

/// Acknowledgement returned by a monthly toggle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyToggleResponse {
    #[schema(example = "success")]
    pub status: String,
    pub habit_key: HabitKey,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub done: bool,
}

impl From<WeeklyTrackDBResponse> for WeeklyTrackResponse {
    fn from(db: WeeklyTrackDBResponse) -> Self {
        Self {
            tm_key: db.track_key,
            habit_key: db.habit_key,
            done: db.done_date,
            status: db.status,
        }
    }
}

impl From<WeeklyTrackDBResponse> for WeeklyToggleResponse {
    fn from(db: WeeklyTrackDBResponse) -> Self {
        Self {
            status: SUCCESS.to_string(),
            habit_key: db.habit_key,
            date: db.done_date,
            done: db.status,
        }
    }
}

impl From<MonthlyTrackDBResponse> for MonthlyTrackResponse {
    fn from(db: MonthlyTrackDBResponse) -> Self {
        Self {
            tm_key: db.track_key,
            habit_key: db.habit_key,
            year: db.year,
            month: db.month,
            day: db.day,
            status: db.status,
        }
    }
}

impl From<MonthlyTrackDBResponse> for MonthlyToggleResponse {
    fn from(db: MonthlyTrackDBResponse) -> Self {
        Self {
            status: SUCCESS.to_string(),
            habit_key: db.habit_key,
            year: db.year,
            month: db.month,
            day: db.day,
            done: db.status,
        }
    }
}
