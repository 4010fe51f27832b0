//! # Palaver Extras
//!
//! Optional utilities for `palaver`:
//!
//! - **Server** (`server` feature): axum health-check routes and mock fixtures
//! - **Schema** (`schema` feature): validation of token and voice-catalog payloads
//! - **Telemetry** (`telemetry` feature): tracing subscriber initialisation
#![deny(unsafe_code)]

pub mod error;

#[cfg(feature = "schema")]
pub mod schema;

#[cfg(feature = "telemetry")]
pub mod telemetry;

#[cfg(feature = "server")]
pub mod server;

pub use error::{ExtrasError, Result};
