//! Capability traits implemented by chat adapters.

mod chat;

pub use chat::*;
