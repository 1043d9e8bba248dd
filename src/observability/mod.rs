//! Structured logging with credential redaction.

mod logging;

pub use logging::{Logger, LogLevel, NoopLogger, StructuredLogger};
