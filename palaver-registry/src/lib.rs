//! palaver-registry
//!
//! Adapter registry, provider routing with fallback, and availability probes.
#![deny(unsafe_code)]

pub use palaver_core::{ChatError, error, traits, types};

pub mod probe;
pub mod registry;
pub mod router;
pub mod selection;

pub use probe::{AvailabilityProbe, HttpHealthProbe};
pub use registry::ProviderRegistry;
pub use router::{ProviderRouter, RouteEvent, RouteOptions};
pub use selection::ProviderSelection;
