//! HTTP transport layer for provider API calls.

pub mod endpoints;
mod error;
mod http;
mod request;
mod response;
mod reqwest;

pub use error::TransportError;
pub use http::{ChunkedStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use request::RequestBuilder;
pub use response::ResponseParser;
pub use self::reqwest::ReqwestTransport;
