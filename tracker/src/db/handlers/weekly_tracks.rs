//! Database repository for weekly (per-date) completion tracking.

use crate::db::{
    errors::Result,
    models::weekly_tracks::{WeeklyTrackDBResponse, WeeklyTrackUpsertDBRequest},
};
use crate::types::HabitKey;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Filter for listing one habit's weekly records. Bounds are inclusive.
#[derive(Debug, Clone)]
pub struct WeeklyTrackFilter {
    pub habit_key: HabitKey,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl WeeklyTrackFilter {
    pub fn new(habit_key: HabitKey) -> Self {
        Self {
            habit_key,
            from: None,
            to: None,
        }
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

pub struct WeeklyTracks<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> WeeklyTracks<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Records for one habit, oldest date first
    #[instrument(skip(self, filter), fields(habit_key = filter.habit_key), err)]
    pub async fn list(&mut self, filter: &WeeklyTrackFilter) -> Result<Vec<WeeklyTrackDBResponse>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT track_key, habit_key, done_date, status FROM weekly_tracks WHERE habit_key = ");
        query.push_bind(filter.habit_key);

        if let Some(from) = filter.from {
            query.push(" AND done_date >= ");
            query.push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND done_date <= ");
            query.push_bind(to);
        }

        query.push(" ORDER BY done_date");

        let tracks = query.build_query_as::<WeeklyTrackDBResponse>().fetch_all(&mut *self.db).await?;

        Ok(tracks)
    }

    /// Insert the (habit, date) row or overwrite its status. One statement, so concurrent
    /// toggles for the same pair converge on a single row.
    #[instrument(skip(self, request), fields(habit_key = request.habit_key, date = %request.done_date, done = request.status), err)]
    pub async fn upsert(&mut self, request: &WeeklyTrackUpsertDBRequest) -> Result<WeeklyTrackDBResponse> {
        let track = sqlx::query_as::<_, WeeklyTrackDBResponse>(
            r#"
            INSERT INTO weekly_tracks (habit_key, done_date, status)
            VALUES (?, ?, ?)
            ON CONFLICT (habit_key, done_date) DO UPDATE SET status = excluded.status
            RETURNING track_key, habit_key, done_date, status
            "#,
        )
        .bind(request.habit_key)
        .bind(request.done_date)
        .bind(request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(track)
    }
}
