//! Core data types shared by every palaver crate.

mod message;
mod provider;
mod streaming;

pub use message::*;
pub use provider::*;
pub use streaming::*;
