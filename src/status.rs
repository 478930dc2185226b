use std::borrow::Cow;
use std::fmt;

use crate::classify::trim_buffer;
use crate::error::ParseError;
use crate::options::Options;
use crate::repair::sanitize_with_options;

/// Tri-state validity of a metadata buffer.
///
/// `Idle` iff the trimmed buffer is empty; otherwise `Valid` iff the
/// buffer parses as strict JSON. Classification never repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataStatus {
    #[default]
    Idle,
    Valid,
    Invalid,
}

impl MetadataStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataStatus::Idle => "idle",
            MetadataStatus::Valid => "valid",
            MetadataStatus::Invalid => "invalid",
        }
    }
}

impl fmt::Display for MetadataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn classify(buffer: &str) -> MetadataStatus {
    if trim_buffer(buffer).is_empty() {
        return MetadataStatus::Idle;
    }
    match serde_json::from_str::<serde_json::Value>(buffer) {
        Ok(_) => MetadataStatus::Valid,
        Err(_) => MetadataStatus::Invalid,
    }
}

/// Strict-parse error for a buffer that classifies as `Invalid`.
pub(crate) fn parse_error(buffer: &str) -> Option<ParseError> {
    if classify(buffer) != MetadataStatus::Invalid {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(buffer)
        .err()
        .map(ParseError::from)
}

pub(crate) fn format_with_options(
    buffer: &str,
    attempt_repair: bool,
    opts: &Options,
) -> Option<String> {
    let trimmed = trim_buffer(buffer);
    if trimmed.is_empty() {
        return Some(String::new());
    }

    let mut candidates: Vec<Cow<'_, str>> = vec![Cow::Borrowed(trimmed)];
    if attempt_repair {
        let repaired = sanitize_with_options(buffer, opts);
        if !repaired.is_empty() && repaired != buffer {
            candidates.push(Cow::Owned(repaired));
        }
    }

    for candidate in candidates {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&candidate) {
            // preserve_order keeps object keys in parse order, so the
            // canonical form never reorders what the user typed.
            return serde_json::to_string_pretty(&value).ok();
        }
    }

    None
}
