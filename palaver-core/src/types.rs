//! Data types (re-exported from `palaver-spec`).

pub use palaver_spec::types::*;
