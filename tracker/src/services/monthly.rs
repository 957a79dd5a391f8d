use crate::db::{
    handlers::{MonthlyTracks, monthly_tracks::MonthlyTrackFilter},
    models::{
        habits::HabitDBResponse,
        monthly_tracks::{MonthlyTrackDBResponse, MonthlyTrackUpsertDBRequest},
    },
};
use crate::errors::{Error, Result};
use crate::services::{HabitService, tracking_write_error};
use crate::types::HabitKey;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::instrument;

/// Per-(year, month, day) completion tracking.
#[derive(Clone)]
pub struct MonthlyService {
    db: SqlitePool,
    habits: HabitService,
}

impl MonthlyService {
    pub fn new(db: SqlitePool, habits: HabitService) -> Self {
        Self { db, habits }
    }

    pub async fn all_habits(&self) -> Result<Vec<HabitDBResponse>> {
        self.habits.list().await
    }

    /// Stored records for one habit, optionally narrowed to a year or a single month.
    #[instrument(skip(self), err)]
    pub async fn month_data(
        &self,
        habit_key: HabitKey,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<MonthlyTrackDBResponse>> {
        let filter = match (year, month) {
            (None, None) => MonthlyTrackFilter::new(habit_key),
            (Some(year), None) => MonthlyTrackFilter::new(habit_key).in_year(year),
            (Some(year), Some(month)) if (1..=12).contains(&month) => {
                MonthlyTrackFilter::new(habit_key).in_month(year, month as i32)
            }
            (Some(_), Some(month)) => return Err(Error::bad_request(format!("Month {month} is out of range 1-12"))),
            (None, Some(_)) => return Err(Error::bad_request("Filtering by month requires a year")),
        };

        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let tracks = MonthlyTracks::new(&mut conn).list(&filter).await?;

        Ok(tracks)
    }

    /// Set the completion status of `habit_key` on the given calendar day.
    #[instrument(skip(self), err)]
    pub async fn toggle(
        &self,
        habit_key: HabitKey,
        year: i32,
        month: u32,
        day: u32,
        done: bool,
    ) -> Result<MonthlyTrackDBResponse> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::bad_request(format!("{year}-{month:02}-{day:02} is not a calendar date")))?;

        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let track = MonthlyTracks::new(&mut conn)
            .upsert(&MonthlyTrackUpsertDBRequest::for_date(habit_key, date, done))
            .await
            .map_err(|e| tracking_write_error(habit_key, e))?;

        tracing::debug!(track_key = track.track_key, "Recorded monthly status");
        Ok(track)
    }
}
