//! Trait-based structured logging over the tracing crate.

use serde_json::Value;

/// Minimum severity a logger will emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational detail.
    Info,
    /// Verbose diagnostic detail.
    Debug,
}

/// Structured logger with JSON context fields.
///
/// Services hold a `Box<dyn Logger>` so tests can substitute a no-op
/// or capturing implementation.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger backed by the tracing crate.
///
/// Context fields are redacted before emission so credentials never
/// reach log output.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a logger with the given target name at info level.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum level this logger emits.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Mask credential-bearing fields, recursing into nested objects.
    fn redact(&self, mut fields: Value) -> Value {
        const SENSITIVE: [&str; 9] = [
            "api_key",
            "apiKey",
            "key",
            "token",
            "access_token",
            "accessToken",
            "secret",
            "authorization",
            "credential",
        ];

        if let Some(obj) = fields.as_object_mut() {
            for key in SENSITIVE {
                if obj.contains_key(key) {
                    obj.insert(key.to_string(), Value::String("***REDACTED***".to_string()));
                }
            }
            for value in obj.values_mut() {
                if value.is_object() {
                    *value = self.redact(value.take());
                }
            }
        }

        fields
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Debug) {
            let fields = self.redact(fields);
            tracing::debug!(target: "atam_copilot", logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Info) {
            let fields = self.redact(fields);
            tracing::info!(target: "atam_copilot", logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Warn) {
            let fields = self.redact(fields);
            tracing::warn!(target: "atam_copilot", logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Error) {
            let fields = self.redact(fields);
            tracing::error!(target: "atam_copilot", logger = %self.name, fields = %fields, "{message}");
        }
    }
}

/// Logger that discards everything. Used in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_filtering() {
        let logger = StructuredLogger::new("upload").with_level(LogLevel::Warn);
        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
    }

    #[test]
    fn test_redacts_credential_fields() {
        let logger = StructuredLogger::new("chat");
        let redacted = logger.redact(json!({
            "api_key": "secret-123",
            "model": "gemini-2.5-flash"
        }));
        assert_eq!(redacted["api_key"], "***REDACTED***");
        assert_eq!(redacted["model"], "gemini-2.5-flash");
    }

    #[test]
    fn test_redacts_nested_objects() {
        let logger = StructuredLogger::new("chat");
        let redacted = logger.redact(json!({
            "request": {"authorization": "Bearer t", "path": "/files"}
        }));
        assert_eq!(redacted["request"]["authorization"], "***REDACTED***");
        assert_eq!(redacted["request"]["path"], "/files");
    }
}
