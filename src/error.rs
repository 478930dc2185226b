use thiserror::Error;

/// Strict-parse failure, with the position serde_json reported.
///
/// Malformed metadata is a normal outcome, not a fault: classification
/// returns [`crate::MetadataStatus::Invalid`] and formatting returns
/// `None`. `ParseError` exists for hosts that want to surface a reason
/// alongside the invalid marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    message: String,
}

impl ParseError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
