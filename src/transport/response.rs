//! HTTP response parsing for provider API calls.

use serde::de::DeserializeOwned;

use super::http::HttpResponse;
use crate::error::{map_http_status, CopilotError};

/// Parses provider HTTP responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a successful response body, or map an error status to a
    /// [`CopilotError`] via [`map_http_status`].
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, CopilotError> {
        if (200..300).contains(&response.status) {
            let parsed: T = serde_json::from_slice(&response.body)?;
            Ok(parsed)
        } else {
            Err(map_http_status(response.status, &response.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use bytes::Bytes;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_successful_response() {
        let parsed: TestResponse =
            ResponseParser::parse_response(response(200, r#"{"name":"files/abc"}"#)).unwrap();
        assert_eq!(parsed.name, "files/abc");
    }

    #[test]
    fn test_parse_error_response() {
        let err = ResponseParser::parse_response::<TestResponse>(response(
            403,
            r#"{"error":{"message":"permission denied"}}"#,
        ))
        .unwrap_err();

        match err {
            CopilotError::Provider(ProviderError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_success_body() {
        let err =
            ResponseParser::parse_response::<TestResponse>(response(200, "not json")).unwrap_err();
        assert!(matches!(
            err,
            CopilotError::Provider(ProviderError::MalformedResponse { .. })
        ));
    }
}
