//! Mock transport and auth implementations for tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::auth::AuthManager;
use crate::transport::{
    ChunkedStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
};

enum QueuedResponse {
    Reply(Result<HttpResponse, TransportError>),
    /// Never resolves; the flag is set when the pending call is dropped.
    Hang(Arc<AtomicBool>),
}

/// Sets its flag when dropped, marking a hung request as cancelled.
struct CancelGuard(Arc<AtomicBool>);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// In-memory HTTP transport with queued responses and request
/// recording.
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<QueuedResponse>>,
    streaming_responses: Mutex<VecDeque<Result<Vec<Bytes>, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            streaming_responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next buffered request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(QueuedResponse::Reply(response));
    }

    /// Queue a JSON response with the given status and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = std::collections::HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Queue a transport error for the next buffered request.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// Queue a request that never completes. Returns a flag that is set
    /// once the caller gives up and drops the pending call.
    pub fn enqueue_hanging_response(&self) -> Arc<AtomicBool> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.responses
            .lock()
            .unwrap()
            .push_back(QueuedResponse::Hang(Arc::clone(&cancelled)));
        cancelled
    }

    /// Queue a streaming response delivered as the given byte chunks.
    pub fn enqueue_streaming_response(&self, chunks: Vec<Bytes>) {
        self.streaming_responses.lock().unwrap().push_back(Ok(chunks));
    }

    /// Queue a streaming request failure.
    pub fn enqueue_streaming_error(&self, error: TransportError) {
        self.streaming_responses.lock().unwrap().push_back(Err(error));
    }

    /// All recorded requests, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Number of requests recorded so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Assert that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.request_count();
        assert_eq!(actual, expected, "expected {expected} requests, got {actual}");
    }

    /// Assert method and URL substring of the request at `index`.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "no request at index {index}");
        let request = &requests[index];
        assert_eq!(request.method, method);
        assert!(
            request.url.contains(url_contains),
            "expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        let queued = self.responses.lock().unwrap().pop_front();
        match queued {
            Some(QueuedResponse::Reply(response)) => response,
            Some(QueuedResponse::Hang(flag)) => {
                let _guard = CancelGuard(flag);
                futures::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            None => Err(TransportError::Connection(
                "no response queued in MockHttpTransport".to_string(),
            )),
        }
    }

    async fn send_streaming(&self, request: HttpRequest) -> Result<ChunkedStream, TransportError> {
        self.requests.lock().unwrap().push(request);

        let chunks = self
            .streaming_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection(
                    "no streaming response queued in MockHttpTransport".to_string(),
                ))
            })?;

        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
    }
}

/// Auth manager with a fixed key for tests.
#[derive(Clone)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Header-based mock auth with the given key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Query-parameter-based mock auth with the given key.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        self.use_header
            .then(|| ("x-goog-api-key".to_string(), self.api_key.clone()))
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        (!self.use_header).then(|| ("key".to_string(), self.api_key.clone()))
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::collections::HashMap;
    use std::time::Duration;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_queued_responses_in_order() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, r#"{"id": 1}"#);
        transport.enqueue_json_response(201, r#"{"id": 2}"#);

        assert_eq!(transport.send(request("https://a")).await.unwrap().status, 200);
        assert_eq!(transport.send(request("https://b")).await.unwrap().status, 201);
        transport.verify_request_count(2);
        transport.verify_request(1, HttpMethod::Post, "https://b");
    }

    #[tokio::test]
    async fn test_unqueued_request_fails() {
        let transport = MockHttpTransport::new();
        assert!(transport.send(request("https://a")).await.is_err());
    }

    #[tokio::test]
    async fn test_streaming_chunks_are_replayed() {
        let transport = MockHttpTransport::new();
        transport.enqueue_streaming_response(vec![Bytes::from("ab"), Bytes::from("cd")]);

        let stream = transport.send_streaming(request("https://s")).await.unwrap();
        let chunks: Vec<Bytes> = stream.map(Result::unwrap).collect().await;
        assert_eq!(chunks, vec![Bytes::from("ab"), Bytes::from("cd")]);
    }

    #[tokio::test]
    async fn test_hanging_response_reports_cancellation() {
        let transport = Arc::new(MockHttpTransport::new());
        let cancelled = transport.enqueue_hanging_response();

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            transport.send(request("https://slow")),
        )
        .await;

        assert!(result.is_err());
        assert!(cancelled.load(Ordering::SeqCst));
    }

    #[test]
    fn test_mock_auth_modes() {
        let header = MockAuthManager::new("k");
        assert_eq!(
            header.get_auth_header(),
            Some(("x-goog-api-key".to_string(), "k".to_string()))
        );
        assert!(header.get_auth_query_param().is_none());

        let query = MockAuthManager::with_query_param("k");
        assert!(query.get_auth_header().is_none());
        assert_eq!(
            query.get_auth_query_param(),
            Some(("key".to_string(), "k".to_string()))
        );
    }
}
