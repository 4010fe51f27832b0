//! Server adapter utilities

/// Axum routers for health checks and mock fixtures
pub mod axum;
