//! Empty-chunk smoothing.

use futures::{Stream, StreamExt};

use crate::types::TextChunk;

/// Options for [`smooth_stream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothStreamOptions {
    /// Drop chunks whose text is present but empty.
    pub filter_empty: bool,
}

impl SmoothStreamOptions {
    pub fn filter_empty() -> Self {
        Self { filter_empty: true }
    }
}

/// Forward `source` in order, optionally dropping empty-text chunks.
///
/// A chunk is dropped only when filtering is enabled and its text is
/// `Some("")`; chunks without text always pass. Each input item is awaited
/// before the next one is requested and a surviving chunk is yielded before the
/// source is polled again, so dropping the returned stream stops all reads.
///
/// An `Err` item is forwarded unchanged and ends the stream.
pub fn smooth_stream<S, T, E>(
    source: S,
    options: SmoothStreamOptions,
) -> impl Stream<Item = Result<T, E>>
where
    S: Stream<Item = Result<T, E>>,
    T: TextChunk,
{
    async_stream::stream! {
        let mut source = std::pin::pin!(source);
        while let Some(item) = source.next().await {
            match item {
                Ok(chunk) => {
                    if options.filter_empty && chunk.text().is_some_and(str::is_empty) {
                        continue;
                    }
                    yield Ok(chunk);
                }
                Err(err) => {
                    yield Err(err);
                    break;
                }
            }
        }
    }
}

/// Method form of [`smooth_stream`].
pub trait SmoothStreamExt: Stream + Sized {
    fn smooth<T, E>(self, options: SmoothStreamOptions) -> impl Stream<Item = Result<T, E>>
    where
        Self: Stream<Item = Result<T, E>>,
        T: TextChunk,
    {
        smooth_stream(self, options)
    }
}

impl<S: Stream> SmoothStreamExt for S {}

/// Concatenate the text of every chunk until the stream ends or fails.
pub async fn collect_text<S, T, E>(source: S) -> Result<String, E>
where
    S: Stream<Item = Result<T, E>>,
    T: TextChunk,
{
    let mut source = std::pin::pin!(source);
    let mut out = String::new();
    while let Some(item) = source.next().await {
        if let Some(text) = item?.text() {
            out.push_str(text);
        }
    }
    Ok(out)
}
