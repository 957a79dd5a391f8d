use crate::AppState;
use crate::api::models::{
    habits::HabitResponse,
    tracking::{WeeklyRangeQuery, WeeklyToggleQuery, WeeklyToggleResponse, WeeklyTrackResponse},
};
use crate::errors::Result;
use crate::types::HabitKey;
use axum::{
    Json,
    extract::{Path, Query, State},
};

#[utoipa::path(
    get,
    path = "/weekly",
    tag = "weekly",
    summary = "List habits for the weekly view",
    responses(
        (status = 200, description = "All habits", body = Vec<HabitResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_weekly_habits(State(state): State<AppState>) -> Result<Json<Vec<HabitResponse>>> {
    let habits = state.weekly.all_habits().await?;
    Ok(Json(habits.into_iter().map(HabitResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/weekly/{habit_key}",
    tag = "weekly",
    summary = "Get weekly records",
    description = "Stored records for a habit ordered by date. Without `from`/`to` every record is returned.",
    responses(
        (status = 200, description = "Weekly records", body = Vec<WeeklyTrackResponse>),
        (status = 400, description = "Invalid date or `from` after `to`"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key"),
        WeeklyRangeQuery
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_done_days(
    State(state): State<AppState>,
    Path(habit_key): Path<HabitKey>,
    Query(query): Query<WeeklyRangeQuery>,
) -> Result<Json<Vec<WeeklyTrackResponse>>> {
    let tracks = state.weekly.done_days(habit_key, query.from, query.to).await?;
    Ok(Json(tracks.into_iter().map(WeeklyTrackResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/weekly/{habit_key}",
    tag = "weekly",
    summary = "Set weekly status",
    description = "Marks a habit done or not done on a date. Repeating the call is harmless.",
    responses(
        (status = 200, description = "Status recorded", body = WeeklyToggleResponse),
        (status = 400, description = "Missing or malformed `date`/`done`"),
        (status = 404, description = "Habit not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key"),
        WeeklyToggleQuery
    )
)]
#[tracing::instrument(skip_all)]
pub async fn toggle_weekly(
    State(state): State<AppState>,
    Path(habit_key): Path<HabitKey>,
    Query(query): Query<WeeklyToggleQuery>,
) -> Result<Json<WeeklyToggleResponse>> {
    let track = state.weekly.toggle(habit_key, query.date, query.done).await?;
    Ok(Json(track.into()))
}
