#[derive(Clone, Debug)]
pub struct Options {
    /// Rewrite single-quoted segments into double-quoted segments,
    /// escaping embedded double quotes and closing unterminated spans.
    pub convert_single_quotes: bool,
    /// Wrap bare identifier-shaped object keys in double quotes, both
    /// inline (after `{`/`,`) and at the start of a line.
    pub quote_bare_keys: bool,
    /// Drop a semicolon that only precedes (modulo whitespace) a closing
    /// bracket or end-of-input.
    pub strip_semicolons: bool,
    /// Drop a comma that only precedes (modulo whitespace) `}` or `]`.
    pub strip_trailing_commas: bool,
    /// Append closers for unmatched `{`/`[` at the end of the buffer.
    pub auto_close: bool,
    /// Enable repair logging. Use `sanitize_with_log` to retrieve entries.
    pub logging: bool,
    /// Context window size used when building log context snippets.
    /// Controls how many characters are captured on both sides of the position.
    pub log_context_window: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            convert_single_quotes: true,
            quote_bare_keys: true,
            strip_semicolons: true,
            strip_trailing_commas: true,
            auto_close: true,
            logging: false,
            log_context_window: 10,
        }
    }
}
