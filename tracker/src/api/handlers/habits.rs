use crate::AppState;
use crate::api::models::habits::{HabitCreate, HabitResponse, HabitUpdate};
use crate::errors::Result;
use crate::types::HabitKey;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
};

#[utoipa::path(
    post,
    path = "/habit",
    tag = "habits",
    summary = "Create habit",
    request_body = HabitCreate,
    responses(
        (status = 201, description = "Habit created; its URL is in the Location header"),
        (status = 400, description = "Blank name or end before start"),
        (status = 422, description = "Body does not match the habit schema"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_habit(
    State(state): State<AppState>,
    Json(create): Json<HabitCreate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1])> {
    let habit = state.habits.create(&create.into()).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/tracker/habit/{}", habit.habit_key))],
    ))
}

#[utoipa::path(
    get,
    path = "/habit",
    tag = "habits",
    summary = "List habits",
    responses(
        (status = 200, description = "All habits, oldest first", body = Vec<HabitResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<HabitResponse>>> {
    let habits = state.habits.list().await?;
    Ok(Json(habits.into_iter().map(HabitResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/habit/{habit_key}",
    tag = "habits",
    summary = "Get habit",
    responses(
        (status = 200, description = "Habit details", body = HabitResponse),
        (status = 404, description = "Habit not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_habit(State(state): State<AppState>, Path(habit_key): Path<HabitKey>) -> Result<Json<HabitResponse>> {
    let habit = state.habits.get(habit_key).await?;
    Ok(Json(habit.into()))
}

#[utoipa::path(
    put,
    path = "/habit/{habit_key}",
    tag = "habits",
    summary = "Update habit",
    request_body = HabitUpdate,
    responses(
        (status = 200, description = "Habit updated"),
        (status = 400, description = "Blank name or end before start"),
        (status = 422, description = "Body does not match the habit schema"),
        (status = 404, description = "Habit not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_key): Path<HabitKey>,
    Json(update): Json<HabitUpdate>,
) -> Result<StatusCode> {
    state.habits.update(habit_key, &update.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/habit/{habit_key}",
    tag = "habits",
    summary = "Delete habit",
    description = "Deletes the habit together with all of its weekly and monthly records.",
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 404, description = "Habit not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_habit(State(state): State<AppState>, Path(habit_key): Path<HabitKey>) -> Result<StatusCode> {
    state.habits.delete(habit_key).await?;
    Ok(StatusCode::NO_CONTENT)
}
