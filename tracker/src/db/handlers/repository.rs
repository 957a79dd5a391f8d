//! CRUD surface shared by table repositories.

use crate::db::errors::Result;

/// Create, read, update, delete and list for one table.
///
/// Requests and responses are the records in [`crate::db::models`]. Only habits have a
/// full CRUD lifecycle; the tracking tables expose upserts on their own repository types.
#[async_trait::async_trait]
pub trait Repository {
    type CreateRequest;
    type UpdateRequest;
    type Response;
    type Id: Send + Sync;
    /// Narrows `list`; `()` when the table is always listed whole
    type Filter: Send + Sync;

    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// `Ok(None)` when no row has this id
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Returns whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;

    /// Fails with [`crate::db::errors::DbError::NotFound`] when no row has this id
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}
