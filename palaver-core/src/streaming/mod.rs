//! Streaming Module
//!
//! Chunk-level helpers that sit between a raw provider stream and its
//! consumer. Everything here is pull-based: nothing is read from the source
//! until the consumer asks for the next item.

mod smooth;

pub use smooth::*;

use std::pin::Pin;

use futures::Stream;

use crate::error::ChatError;

/// Boxed chunk stream handed from adapters to consumers.
pub type ChunkStream<T> = Pin<Box<dyn Stream<Item = Result<T, ChatError>> + Send>>;
