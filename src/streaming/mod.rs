//! Streaming support for chunked generation responses.

mod chunked_json;
mod text;

pub use chunked_json::{ByteStream, ChunkParser};
pub use text::{ResponseStream, TextFragmentStream};
