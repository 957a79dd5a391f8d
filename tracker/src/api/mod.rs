//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers, one module per resource
//! - **[`models`]**: Request/response structures in the client's camelCase wire format
//!
//! # API Structure
//!
//! Everything lives under `/api/tracker`:
//!
//! - **Habits** (`/habit`, `/habit/{key}`): create, list, get, update, delete
//! - **Weekly** (`/weekly`, `/weekly/{key}`): habit listing, per-date records and toggles
//! - **Monthly** (`/monthly`, `/monthly/{key}`): habit listing, per-day records and toggles
//!
//! All endpoints are documented with `utoipa`; the reference UI is served at `/docs`.

pub mod handlers;
pub mod models;
