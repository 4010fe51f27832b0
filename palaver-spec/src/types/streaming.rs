//! Incremental stream chunks.

use serde::{Deserialize, Serialize};

/// Anything that may carry a piece of partial text.
///
/// Chunks without text (control frames, usage updates) return `None`.
pub trait TextChunk {
    fn text(&self) -> Option<&str>;
}

impl<C: TextChunk + ?Sized> TextChunk for &C {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<C: TextChunk + ?Sized> TextChunk for Box<C> {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

/// A streamed unit: optional partial text plus the raw provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk<T = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub data: T,
}

impl<T> StreamChunk<T> {
    pub fn new(text: Option<String>, data: T) -> Self {
        Self { text, data }
    }
}

impl StreamChunk<()> {
    /// Text-only chunk with no payload.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            data: (),
        }
    }

    /// Chunk without text.
    pub fn control() -> Self {
        Self {
            text: None,
            data: (),
        }
    }
}

impl<T> TextChunk for StreamChunk<T> {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
