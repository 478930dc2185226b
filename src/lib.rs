mod classify;
pub mod cli;
pub mod error;
mod field;
mod history;
mod keys;
pub mod options;
mod repair;
mod status;

pub use error::ParseError;
pub use field::{FieldUpdate, MetadataField};
pub use history::{EditHistory, HistoryMode, HistoryStep, TYPING_SNAPSHOT_WINDOW};
pub use keys::{INDENT, Key, KeyDecision, KeyEvent, Modifiers, Selection, decide};
pub use options::Options;
pub use repair::SanitizeLogEntry;
pub use status::MetadataStatus;

/// Best-effort repair of hand-typed pseudo-JSON into valid JSON.
/// Converts single-quoted segments, quotes bare object keys, strips
/// loose semicolons and trailing commas, and closes unbalanced
/// brackets. Never fails; worst case the input comes back reassembled
/// and still invalid, which the caller detects by classifying.
pub fn sanitize(raw: &str) -> String {
    repair::sanitize_with_options(raw, &Options::default())
}

/// Like [`sanitize`], with per-pass toggles.
pub fn sanitize_with_options(raw: &str, opts: &Options) -> String {
    repair::sanitize_with_options(raw, opts)
}

/// Like [`sanitize`], returning the repairs performed when
/// `opts.logging` is set.
pub fn sanitize_with_log(raw: &str, opts: &Options) -> (String, Vec<SanitizeLogEntry>) {
    repair::sanitize_with_log(raw, opts)
}

/// Classify a buffer as idle (trim-empty), valid (strict JSON) or
/// invalid. Never invokes the repair engine.
pub fn classify(buffer: &str) -> MetadataStatus {
    status::classify(buffer)
}

/// Canonicalize a buffer with 2-space indentation, preserving key
/// order. Tries the raw buffer first; when `attempt_repair` is set and
/// that fails, tries once more on the sanitized text. `None` means the
/// buffer could not be made valid; an empty buffer formats to `""`.
pub fn format(buffer: &str, attempt_repair: bool) -> Option<String> {
    status::format_with_options(buffer, attempt_repair, &Options::default())
}

/// Like [`format`], with repair-pass toggles.
pub fn format_with_options(buffer: &str, attempt_repair: bool, opts: &Options) -> Option<String> {
    status::format_with_options(buffer, attempt_repair, opts)
}

/// Strict-parse failure for a buffer that classifies as invalid, for
/// hosts that surface a reason next to the invalid marker.
pub fn parse_error(buffer: &str) -> Option<ParseError> {
    status::parse_error(buffer)
}

#[cfg(test)]
mod tests;
