use crate::db::{
    errors::DbError,
    handlers::{Habits, Repository},
    models::habits::{HabitCreateDBRequest, HabitDBResponse, HabitUpdateDBRequest},
};
use crate::errors::{Error, Result};
use crate::types::{HabitKey, resource};
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::instrument;

/// Habit management: the only writer of the `habits` table.
#[derive(Clone)]
pub struct HabitService {
    db: SqlitePool,
}

impl HabitService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip_all, fields(name = %request.name), err)]
    pub async fn create(&self, request: &HabitCreateDBRequest) -> Result<HabitDBResponse> {
        validate_habit(&request.name, request.start_at, request.end_at)?;

        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let habit = Habits::new(&mut conn).create(request).await?;

        tracing::info!(habit_key = habit.habit_key, "Created habit");
        Ok(habit)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&self) -> Result<Vec<HabitDBResponse>> {
        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let habits = Habits::new(&mut conn).list(&()).await?;
        Ok(habits)
    }

    #[instrument(skip(self), err)]
    pub async fn get(&self, habit_key: HabitKey) -> Result<HabitDBResponse> {
        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

        Habits::new(&mut conn)
            .get_by_id(habit_key)
            .await?
            .ok_or_else(|| Error::not_found(resource::HABIT, habit_key))
    }

    #[instrument(skip(self, request), err)]
    pub async fn update(&self, habit_key: HabitKey, request: &HabitUpdateDBRequest) -> Result<HabitDBResponse> {
        validate_habit(&request.name, request.start_at, request.end_at)?;

        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

        match Habits::new(&mut conn).update(habit_key, request).await {
            Ok(habit) => Ok(habit),
            Err(DbError::NotFound) => Err(Error::not_found(resource::HABIT, habit_key)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), err)]
    pub async fn delete(&self, habit_key: HabitKey) -> Result<()> {
        let mut conn = self.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

        if Habits::new(&mut conn).delete(habit_key).await? {
            tracing::info!(habit_key, "Deleted habit and its tracking records");
            Ok(())
        } else {
            Err(Error::not_found(resource::HABIT, habit_key))
        }
    }
}

fn validate_habit(name: &str, start_at: Option<NaiveDateTime>, end_at: Option<NaiveDateTime>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::bad_request("Habit name must not be empty"));
    }

    if let (Some(start), Some(end)) = (start_at, end_at)
        && end < start
    {
        return Err(Error::bad_request(format!(
            "Habit end ({end}) must not be before its start ({start})"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn create_request(name: &str) -> HabitCreateDBRequest {
        HabitCreateDBRequest {
            name: name.to_string(),
            description: Some("morning routine".to_string()),
            start_at: Some(at(1, 6)),
            end_at: Some(at(31, 7)),
        }
    }

    fn update_request(name: &str) -> HabitUpdateDBRequest {
        HabitUpdateDBRequest {
            name: name.to_string(),
            description: Some("evening routine".to_string()),
            start_at: Some(at(2, 19)),
            end_at: None,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_then_get_round_trips_fields(pool: SqlitePool) {
        let service = HabitService::new(pool);

        let created = service.create(&create_request("Journal")).await.unwrap();
        let fetched = service.get(created.habit_key).await.unwrap();

        assert_eq!(fetched.name, "Journal");
        assert_eq!(fetched.description.as_deref(), Some("morning routine"));
        assert_eq!(fetched.start_at, Some(at(1, 6)));
        assert_eq!(fetched.end_at, Some(at(31, 7)));
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_keeps_creation_timestamp(pool: SqlitePool) {
        let service = HabitService::new(pool);
        let created = service.create(&create_request("Journal")).await.unwrap();

        let updated = service.update(created.habit_key, &update_request("Evening journal")).await.unwrap();

        assert_eq!(updated.name, "Evening journal");
        assert_eq!(updated.description.as_deref(), Some("evening routine"));
        assert_eq!(updated.start_at, Some(at(2, 19)));
        assert_eq!(updated.end_at, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_habit_is_not_found(pool: SqlitePool) {
        let service = HabitService::new(pool);

        assert!(matches!(service.get(7).await, Err(Error::NotFound { .. })));
        assert!(matches!(
            service.update(7, &update_request("Nope")).await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(service.delete(7).await, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_then_get_is_not_found(pool: SqlitePool) {
        let service = HabitService::new(pool);
        let created = service.create(&create_request("Journal")).await.unwrap();

        service.delete(created.habit_key).await.unwrap();

        assert!(matches!(service.get(created.habit_key).await, Err(Error::NotFound { .. })));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rejects_blank_name_and_inverted_range(pool: SqlitePool) {
        let service = HabitService::new(pool);

        let blank = service.create(&create_request("   ")).await;
        assert!(matches!(blank, Err(Error::BadRequest { .. })));

        let mut inverted = create_request("Journal");
        inverted.start_at = Some(at(10, 8));
        inverted.end_at = Some(at(9, 8));
        assert!(matches!(service.create(&inverted).await, Err(Error::BadRequest { .. })));

        // Nothing was written
        assert!(service.list().await.unwrap().is_empty());
    }

    #[test]
    fn open_ended_ranges_are_valid() {
        assert!(validate_habit("Run", Some(at(1, 6)), None).is_ok());
        assert!(validate_habit("Run", None, Some(at(1, 6))).is_ok());
        assert!(validate_habit("Run", Some(at(1, 6)), Some(at(1, 6))).is_ok());
    }
}
