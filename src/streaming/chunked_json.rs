//! Incremental parser for the provider's streaming wire format.
//!
//! Streaming generation responses arrive as a JSON array of response
//! objects, delivered in arbitrary byte chunks:
//!
//! ```json
//! [{"candidates":[...]},
//! {"candidates":[...]}]
//! ```
//!
//! Chunk boundaries do not respect object boundaries, so the parser
//! buffers bytes and emits each response object as soon as it is
//! complete.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{CopilotError, ProviderError};
use crate::types::GenerateContentResponse;

/// Byte stream feeding the parser.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, CopilotError>> + Send>>;

/// Parses the provider's chunked JSON array format into a stream of
/// [`GenerateContentResponse`] values.
pub struct ChunkParser {
    inner: ByteStream,
    /// Bytes received but not yet parsed into a complete object.
    buffer: String,
    /// Set once the closing `]` has been consumed.
    array_closed: bool,
    /// Set once the inner stream has ended.
    inner_done: bool,
    /// Set after a fatal error so the stream terminates.
    failed: bool,
}

impl ChunkParser {
    /// Create a parser over a raw byte stream.
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            buffer: String::new(),
            array_closed: false,
            inner_done: false,
            failed: false,
        }
    }

    /// Drop leading whitespace and comma separators.
    fn skip_separators(&mut self) {
        let trimmed = self
            .buffer
            .trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if trimmed.len() != self.buffer.len() {
            self.buffer = trimmed.to_string();
        }
    }

    /// Try to take one complete response object off the front of the
    /// buffer. Returns `None` when more bytes are needed.
    fn next_object(&mut self) -> Option<Result<GenerateContentResponse, CopilotError>> {
        loop {
            self.skip_separators();

            if self.buffer.is_empty() || self.array_closed {
                return None;
            }

            match self.buffer.as_bytes()[0] {
                b'[' => {
                    self.buffer.remove(0);
                }
                b']' => {
                    self.buffer.remove(0);
                    self.array_closed = true;
                    return None;
                }
                _ => break,
            }
        }

        let (object, rest) = split_json_object(&self.buffer)?;
        let result = serde_json::from_str::<GenerateContentResponse>(object).map_err(|e| {
            CopilotError::from(ProviderError::MalformedResponse {
                message: format!("unparseable stream chunk: {e}"),
            })
        });
        self.buffer = rest.to_string();
        Some(result)
    }

    /// Parse whatever remains in the buffer once the inner stream ends.
    /// Leftover bytes that never completed an object mean the stream
    /// was cut off mid-response.
    fn flush(&mut self) -> Option<Result<GenerateContentResponse, CopilotError>> {
        if let Some(result) = self.next_object() {
            return Some(result);
        }
        if self.array_closed || self.buffer.is_empty() {
            return None;
        }
        self.failed = true;
        Some(Err(ProviderError::StreamInterrupted {
            message: "stream ended mid-response".to_string(),
        }
        .into()))
    }
}

/// Split one complete JSON object off the front of `input`.
///
/// Tracks brace/bracket depth, string boundaries and escape sequences
/// so braces inside string values are ignored. Returns `None` while the
/// leading object is incomplete.
fn split_json_object(input: &str) -> Option<(&str, &str)> {
    if !input.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in input.as_bytes().iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' | b'[' if !in_string => depth += 1,
            b'}' | b']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some((&input[..=i], &input[i + 1..]));
                }
            }
            _ => {}
        }
    }

    None
}

impl Stream for ChunkParser {
    type Item = Result<GenerateContentResponse, CopilotError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.failed {
            return Poll::Ready(None);
        }

        loop {
            if let Some(result) = self.next_object() {
                if result.is_err() {
                    self.failed = true;
                }
                return Poll::Ready(Some(result));
            }

            if self.inner_done || self.array_closed {
                return Poll::Ready(self.flush());
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => self.buffer.push_str(text),
                    Err(_) => {
                        self.failed = true;
                        return Poll::Ready(Some(Err(ProviderError::MalformedResponse {
                            message: "invalid utf-8 in stream".to_string(),
                        }
                        .into())));
                    }
                },
                Poll::Ready(Some(Err(e))) => {
                    self.failed = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    self.inner_done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
