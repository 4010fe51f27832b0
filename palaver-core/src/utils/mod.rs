//! Small shared utilities.

pub mod id;
pub mod lifecycle;

pub use id::{IdGenerator, generate_id};
pub use lifecycle::Lifecycle;
