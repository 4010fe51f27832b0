//! palaver-spec
//!
//! Provider-agnostic data types for palaver.
//!
//! This crate contains only plain data types (messages, provider ids, send
//! options, stream chunks) and the shared error taxonomy. Runtime pieces such as
//! stream filtering, key resolution and adapters live in `palaver-core` and the
//! provider crates.
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{ChatError, ErrorCategory};
