//! Integration tests for streamed generation.

use atam_copilot::fixtures;
use atam_copilot::mocks::MockHttpTransport;
use atam_copilot::transport::TransportError;
use atam_copilot::{
    AtamCopilot, AtamCopilotBuilder, CopilotError, DocumentSource, GeminiConfig, ProviderError,
};
use bytes::Bytes;
use futures::StreamExt;
use secrecy::SecretString;
use std::sync::Arc;

fn copilot(transport: Arc<MockHttpTransport>) -> AtamCopilot {
    let config = GeminiConfig::builder()
        .api_key(SecretString::new("test-key".into()))
        .build()
        .unwrap();
    AtamCopilotBuilder::new(config)
        .transport(transport)
        .build()
        .unwrap()
}

fn source() -> DocumentSource {
    DocumentSource::Uploaded(vec![
        "https://generativelanguage.googleapis.com/v1beta/files/a".to_string(),
    ])
}

#[tokio::test]
async fn test_fragments_arrive_in_generation_order() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_streaming_response(vec![Bytes::from(fixtures::streaming_body(&[
        "## Business",
        " Goals",
        "\n\n1. Cut cost",
    ]))]);

    let stream = copilot(Arc::clone(&transport))
        .extract_business_drivers_stream(source())
        .await
        .unwrap();
    let fragments: Vec<String> = stream.map(Result::unwrap).collect().await;

    assert_eq!(fragments, vec!["## Business", " Goals", "\n\n1. Cut cost"]);
}

#[tokio::test]
async fn test_objects_split_across_chunk_boundaries() {
    // One response object cut mid-string across three byte chunks.
    let body = fixtures::streaming_body(&["Hello streaming world"]);
    let (a, rest) = body.split_at(body.len() / 3);
    let (b, c) = rest.split_at(rest.len() / 2);

    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_streaming_response(vec![
        Bytes::from(a.to_string()),
        Bytes::from(b.to_string()),
        Bytes::from(c.to_string()),
    ]);

    let stream = copilot(Arc::clone(&transport))
        .extract_business_drivers_stream(source())
        .await
        .unwrap();
    let text: String = stream
        .map(Result::unwrap)
        .collect::<Vec<_>>()
        .await
        .concat();

    assert_eq!(text, "Hello streaming world");
}

#[tokio::test]
async fn test_initial_stream_failure_is_an_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_streaming_error(TransportError::Connection("refused".to_string()));

    let err = copilot(Arc::clone(&transport))
        .extract_business_drivers_stream(source())
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err,
        CopilotError::Provider(ProviderError::Network { .. })
    ));
}

#[tokio::test]
async fn test_malformed_chunk_ends_stream_with_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_streaming_response(vec![Bytes::from("[{broken json")]);

    let stream = copilot(Arc::clone(&transport))
        .extract_business_drivers_stream(source())
        .await
        .unwrap();
    let items: Vec<_> = stream.collect().await;

    assert_eq!(items.len(), 1);
    assert!(items[0].is_err());
}

#[tokio::test]
async fn test_empty_stream_yields_no_fragments() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_streaming_response(vec![Bytes::from("[]")]);

    let stream = copilot(Arc::clone(&transport))
        .extract_business_drivers_stream(source())
        .await
        .unwrap();
    let fragments: Vec<_> = stream.collect().await;

    assert!(fragments.is_empty());
}
