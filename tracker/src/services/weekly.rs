use crate::db::{
    handlers::{WeeklyTracks, weekly_tracks::WeeklyTrackFilter},
    models::{
        habits::HabitDBResponse,
        weekly_tracks::{WeeklyTrackDBResponse, WeeklyTrackUpsertDBRequest},
    },
};
use crate::errors::{Error, Result};
use crate::services::{HabitService, tracking_write_error};
use crate::types::HabitKey;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::instrument;

/// Per-date completion tracking.
#[derive(Clone)]
pub struct WeeklyService {
    db: SqlitePool,
    habits: HabitService,
}

impl WeeklyService {
    pub fn new(db: SqlitePool, habits: HabitService) -> Self {
        Self { db, habits }
    }

    pub async fn all_habits(&self) -> Result<Vec<HabitDBResponse>> {
        self.habits.list().await
    }

    /// Stored records for one habit, optionally bounded by an inclusive date range.
    ///
    /// An unknown habit simply has no records.
    #[instrument(skip(self), err)]
    pub async fn done_days(
        &self,
        habit_key: HabitKey,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WeeklyTrackDBResponse>> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(Error::bad_request(format!("Range start {from} is after range end {to}")));
        }

        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let tracks = WeeklyTracks::new(&mut conn)
            .list(&WeeklyTrackFilter::new(habit_key).between(from, to))
            .await?;

        Ok(tracks)
    }

    /// Set the completion status of `habit_key` on `date`, creating the record if needed.
    #[instrument(skip(self), err)]
    pub async fn toggle(&self, habit_key: HabitKey, date: NaiveDate, done: bool) -> Result<WeeklyTrackDBResponse> {
        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let track = WeeklyTracks::new(&mut conn)
            .upsert(&WeeklyTrackUpsertDBRequest {
                habit_key,
                done_date: date,
                status: done,
            })
            .await
            .map_err(|e| tracking_write_error(habit_key, e))?;

        tracing::debug!(track_key = track.track_key, "Recorded weekly status");
        Ok(track)
    }
}
