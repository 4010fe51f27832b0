//! Axum routers.
//!
//! - **Health**: per-vendor configuration checks returning `204` or `500`
//! - **Mock**: fixed JSON fixtures for local development

mod health;
mod mock;

pub use health::{HealthCheck, MissingBody, default_health_checks, health_router};
pub use mock::{Bookmark, StatsSummary, mock_router};
