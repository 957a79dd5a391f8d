//! Database repository for monthly (per year/month/day) completion tracking.

use crate::db::{
    errors::Result,
    models::monthly_tracks::{MonthlyTrackDBResponse, MonthlyTrackUpsertDBRequest},
};
use crate::types::HabitKey;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;

/// Filter for listing one habit's monthly records.
///
/// `month` is only meaningful together with `year`; callers validate that pairing.
#[derive(Debug, Clone)]
pub struct MonthlyTrackFilter {
    pub habit_key: HabitKey,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

impl MonthlyTrackFilter {
    pub fn new(habit_key: HabitKey) -> Self {
        Self {
            habit_key,
            year: None,
            month: None,
        }
    }

    pub fn in_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn in_month(mut self, year: i32, month: i32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }
}

pub struct MonthlyTracks<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> MonthlyTracks<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, filter), fields(habit_key = filter.habit_key, year = ?filter.year, month = ?filter.month), err)]
    pub async fn list(&mut self, filter: &MonthlyTrackFilter) -> Result<Vec<MonthlyTrackDBResponse>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT track_key, habit_key, year, month, day, status FROM monthly_tracks WHERE habit_key = ");
        query.push_bind(filter.habit_key);

        if let Some(year) = filter.year {
            query.push(" AND year = ");
            query.push_bind(year);
        }
        if let Some(month) = filter.month {
            query.push(" AND month = ");
            query.push_bind(month);
        }

        query.push(" ORDER BY year, month, day");

        let tracks = query.build_query_as::<MonthlyTrackDBResponse>().fetch_all(&mut *self.db).await?;

        Ok(tracks)
    }

    /// Insert the (habit, year, month, day) row or overwrite its status.
    #[instrument(
        skip(self, request),
        fields(habit_key = request.habit_key, year = request.year, month = request.month, day = request.day, done = request.status),
        err
    )]
    pub async fn upsert(&mut self, request: &MonthlyTrackUpsertDBRequest) -> Result<MonthlyTrackDBResponse> {
        let track = sqlx::query_as::<_, MonthlyTrackDBResponse>(
            r#"
            INSERT INTO monthly_tracks (habit_key, year, month, day, status)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (habit_key, year, month, day) DO UPDATE SET status = excluded.status
            RETURNING track_key, habit_key, year, month, day, status
            "#,
        )
        .bind(request.habit_key)
        .bind(request.year)
        .bind(request.month)
        .bind(request.day)
        .bind(request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::{ConstraintKind, DbError};
    use crate::test_utils::create_test_habit;
    use sqlx::SqlitePool;

    fn upsert(habit_key: HabitKey, year: i32, month: i32, day: i32, status: bool) -> MonthlyTrackUpsertDBRequest {
        MonthlyTrackUpsertDBRequest {
            habit_key,
            year,
            month,
            day,
            status,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_toggle_twice_keeps_last_write(pool: SqlitePool) {
        let habit = create_test_habit(&pool, "Stretch").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = MonthlyTracks::new(&mut conn);

        let first = repo.upsert(&upsert(habit.habit_key, 2024, 2, 29, false)).await.unwrap();
        let second = repo.upsert(&upsert(habit.habit_key, 2024, 2, 29, true)).await.unwrap();
        assert_eq!(first.track_key, second.track_key);

        let tracks = repo.list(&MonthlyTrackFilter::new(habit.habit_key)).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!((tracks[0].year, tracks[0].month, tracks[0].day), (2024, 2, 29));
        assert!(tracks[0].status);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters_by_year_and_month(pool: SqlitePool) {
        let habit = create_test_habit(&pool, "Stretch").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = MonthlyTracks::new(&mut conn);

        for (year, month, day) in [(2024, 1, 15), (2024, 1, 2), (2024, 2, 1), (2023, 1, 2)] {
            repo.upsert(&upsert(habit.habit_key, year, month, day, true)).await.unwrap();
        }

        let everything = repo.list(&MonthlyTrackFilter::new(habit.habit_key)).await.unwrap();
        assert_eq!(everything.len(), 4);
        assert_eq!(everything[0].year, 2023);

        let year = repo.list(&MonthlyTrackFilter::new(habit.habit_key).in_year(2024)).await.unwrap();
        assert_eq!(year.len(), 3);

        let january = repo
            .list(&MonthlyTrackFilter::new(habit.habit_key).in_month(2024, 1))
            .await
            .unwrap();
        let days: Vec<_> = january.iter().map(|t| t.day).collect();
        assert_eq!(days, vec![2, 15]);

        let empty = repo
            .list(&MonthlyTrackFilter::new(habit.habit_key).in_month(2024, 12))
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_schema_rejects_out_of_range_month(pool: SqlitePool) {
        let habit = create_test_habit(&pool, "Stretch").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = MonthlyTracks::new(&mut conn);

        let result = repo.upsert(&upsert(habit.habit_key, 2024, 13, 1, true)).await;
        assert!(matches!(result, Err(DbError::Constraint { kind: ConstraintKind::Check, .. })), "got {result:?}");
    }
}
