//! Database repository for habits.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::habits::{HabitCreateDBRequest, HabitDBResponse, HabitUpdateDBRequest},
};
use crate::types::HabitKey;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

const HABIT_COLUMNS: &str = "habit_key, name, description, start_at, end_at, created_at";

pub struct Habits<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Habits<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Habits<'c> {
    type CreateRequest = HabitCreateDBRequest;
    type UpdateRequest = HabitUpdateDBRequest;
    type Response = HabitDBResponse;
    type Id = HabitKey;
    type Filter = ();

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        // created_at is assigned here and never rewritten by update
        let habit = sqlx::query_as::<_, HabitDBResponse>(&format!(
            r#"
            INSERT INTO habits (name, description, start_at, end_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {HABIT_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.start_at)
        .bind(request.end_at)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(habit)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let habit = sqlx::query_as::<_, HabitDBResponse>(&format!("SELECT {HABIT_COLUMNS} FROM habits WHERE habit_key = ?"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(habit)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let habits = sqlx::query_as::<_, HabitDBResponse>(&format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY habit_key"))
            .fetch_all(&mut *self.db)
            .await?;

        tracing::debug!("Retrieved {} habits", habits.len());

        Ok(habits)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Tracking rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM habits WHERE habit_key = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let habit = sqlx::query_as::<_, HabitDBResponse>(&format!(
            r#"
            UPDATE habits SET
                name = ?,
                description = ?,
                start_at = ?,
                end_at = ?
            WHERE habit_key = ?
            RETURNING {HABIT_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.start_at)
        .bind(request.end_at)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(habit)
    }
}
