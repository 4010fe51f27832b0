//! Authentication helpers.

pub mod api_key;

pub use api_key::{ApiKeyProvider, KeySource};
