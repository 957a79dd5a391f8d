use crate::AppState;
use crate::api::models::{
    habits::HabitResponse,
    tracking::{MonthlyRangeQuery, MonthlyToggleQuery, MonthlyToggleResponse, MonthlyTrackResponse},
};
use crate::errors::Result;
use crate::types::HabitKey;
use axum::{
    Json,
    extract::{Path, Query, State},
};

#[utoipa::path(
    get,
    path = "/monthly",
    tag = "monthly",
    summary = "List habits for the monthly view",
    responses(
        (status = 200, description = "All habits", body = Vec<HabitResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_monthly_habits(State(state): State<AppState>) -> Result<Json<Vec<HabitResponse>>> {
    let habits = state.monthly.all_habits().await?;
    Ok(Json(habits.into_iter().map(HabitResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/monthly/{habit_key}",
    tag = "monthly",
    summary = "Get monthly records",
    description = "Stored records for a habit ordered by year, month and day, optionally narrowed to a year or one month.",
    responses(
        (status = 200, description = "Monthly records", body = Vec<MonthlyTrackResponse>),
        (status = 400, description = "`month` without `year`, or `month` out of range"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key"),
        MonthlyRangeQuery
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_month_data(
    State(state): State<AppState>,
    Path(habit_key): Path<HabitKey>,
    Query(query): Query<MonthlyRangeQuery>,
) -> Result<Json<Vec<MonthlyTrackResponse>>> {
    let tracks = state.monthly.month_data(habit_key, query.year, query.month).await?;
    Ok(Json(tracks.into_iter().map(MonthlyTrackResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/monthly/{habit_key}",
    tag = "monthly",
    summary = "Set monthly status",
    responses(
        (status = 200, description = "Status recorded", body = MonthlyToggleResponse),
        (status = 400, description = "Not a calendar date, or malformed parameters"),
        (status = 404, description = "Habit not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("habit_key" = i64, Path, description = "Habit key"),
        MonthlyToggleQuery
    )
)]
#[tracing::instrument(skip_all)]
pub async fn toggle_monthly(
    State(state): State<AppState>,
    Path(habit_key): Path<HabitKey>,
    Query(query): Query<MonthlyToggleQuery>,
) -> Result<Json<MonthlyToggleResponse>> {
    let track = state
        .monthly
        .toggle(habit_key, query.year, query.month, query.day, query.done)
        .await?;
    Ok(Json(track.into()))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{
            habits::HabitResponse,
            tracking::{MonthlyToggleResponse, MonthlyTrackResponse},
        },
        test_utils::*,
    };
    use axum::http::StatusCode;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_last_toggle_wins(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let habit = create_test_habit(&pool, "Stretch").await;
        let path = format!("/api/tracker/monthly/{}", habit.habit_key);

        let ack: MonthlyToggleResponse = app
            .post(&format!("{path}?year=2024&month=2&day=29&done=true"))
            .await
            .json();
        assert_eq!(ack.status, "success");
        assert_eq!((ack.year, ack.month, ack.day, ack.done), (2024, 2, 29, true));

        app.post(&format!("{path}?year=2024&month=2&day=29&done=false"))
            .await
            .assert_status_ok();

        let records: Vec<MonthlyTrackResponse> = app.get(&path).await.json();
        assert_eq!(records.len(), 1);
        assert!(!records[0].status);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_month_filter(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let habit = create_test_habit(&pool, "Stretch").await;
        let path = format!("/api/tracker/monthly/{}", habit.habit_key);

        for (month, day) in [(1, 31), (2, 1), (2, 14), (3, 1)] {
            app.post(&format!("{path}?year=2024&month={month}&day={day}&done=true"))
                .await
                .assert_status_ok();
        }

        let february: Vec<MonthlyTrackResponse> = app.get(&format!("{path}?year=2024&month=2")).await.json();
        let days: Vec<_> = february.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![1, 14]);
        assert!(february.iter().all(|r| r.month == 2));

        let year: Vec<MonthlyTrackResponse> = app.get(&format!("{path}?year=2024")).await.json();
        assert_eq!(year.len(), 4);

        app.get(&format!("{path}?month=2")).await.assert_status(StatusCode::BAD_REQUEST);
        app.get(&format!("{path}?year=2024&month=0"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_invalid_day_is_bad_request(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;
        let habit = create_test_habit(&pool, "Stretch").await;

        let response = app
            .post(&format!("/api/tracker/monthly/{}?year=2023&month=2&day=29&done=true", habit.habit_key))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "2023-02-29 is not a calendar date");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_toggle_unknown_habit_is_not_found(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        app.post("/api/tracker/monthly/31?year=2024&month=1&day=1&done=true")
            .await
            .assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_monthly_habit_listing(pool: SqlitePool) {
        let app = create_test_app(pool.clone()).await;

        let empty: Vec<HabitResponse> = app.get("/api/tracker/monthly").await.json();
        assert!(empty.is_empty());

        let stretch = create_test_habit(&pool, "Stretch").await;
        create_test_habit(&pool, "Journal").await;

        let response = app.get("/api/tracker/monthly").await;
        response.assert_status_ok();
        let habits: Vec<HabitResponse> = response.json();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].habit_key, stretch.habit_key);
        assert_eq!(habits[0].name, "Stretch");
        assert_eq!(habits[1].name, "Journal");
    }
}
