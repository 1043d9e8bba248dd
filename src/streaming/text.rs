//! Flattens streaming responses into markdown text fragments.

use futures::stream::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::CopilotError;
use crate::types::GenerateContentResponse;

/// Stream of parsed streaming responses.
pub type ResponseStream =
    Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, CopilotError>> + Send>>;

/// Flattens a stream of generation responses into the text fragments
/// they carry, preserving arrival order.
///
/// Responses without any text (terminal chunks carrying only a finish
/// reason or usage metadata) are skipped rather than emitted as empty
/// strings. The stream terminates after the first error.
pub struct TextFragmentStream {
    inner: ResponseStream,
    pending: VecDeque<String>,
    done: bool,
}

impl TextFragmentStream {
    /// Wrap a response stream.
    pub fn new(inner: ResponseStream) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl Stream for TextFragmentStream {
    type Item = Result<String, CopilotError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(fragment)));
            }

            if self.done {
                return Poll::Ready(None);
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(response))) => {
                    self.pending.extend(response.text_fragments());
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    self.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::types::{Candidate, Content, FinishReason, Part, Role};
    use futures::StreamExt;

    fn response(texts: &[&str]) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: Some(Role::Model),
                    parts: texts.iter().map(|t| Part::from_text(*t)).collect(),
                }),
                finish_reason: None,
            }]),
            usage_metadata: None,
        }
    }

    fn stream_of(
        items: Vec<Result<GenerateContentResponse, CopilotError>>,
    ) -> TextFragmentStream {
        TextFragmentStream::new(Box::pin(futures::stream::iter(items)))
    }

    #[tokio::test]
    async fn test_fragments_preserve_order() {
        let stream = stream_of(vec![
            Ok(response(&["# Business", " Drivers"])),
            Ok(response(&["\n\n- D1"])),
        ]);
        let fragments: Vec<String> = stream.map(Result::unwrap).collect().await;
        assert_eq!(fragments, vec!["# Business", " Drivers", "\n\n- D1"]);
    }

    #[tokio::test]
    async fn test_textless_responses_are_skipped() {
        let terminal = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: None,
                finish_reason: Some(FinishReason::Stop),
            }]),
            usage_metadata: None,
        };
        let stream = stream_of(vec![Ok(response(&["done"])), Ok(terminal)]);
        let fragments: Vec<String> = stream.map(Result::unwrap).collect().await;
        assert_eq!(fragments, vec!["done"]);
    }

    #[tokio::test]
    async fn test_error_ends_stream() {
        let stream = stream_of(vec![
            Ok(response(&["partial"])),
            Err(ProviderError::StreamInterrupted {
                message: "reset".to_string(),
            }
            .into()),
            Ok(response(&["never seen"])),
        ]);
        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }
}
