//! palaver-core
//!
//! Provider-agnostic runtime primitives: the chunk smoother, API key
//! resolution, the chat adapter trait, and lazily initialised upstream clients.
#![deny(unsafe_code)]

pub mod auth;
pub mod client;
pub mod defaults;
pub mod error;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::ChatError;
