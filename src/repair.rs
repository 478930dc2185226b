use crate::classify::{is_key_continue, is_key_start, is_whitespace, trim_buffer};
use crate::options::Options;
use memchr::memchr;

/// One repair performed by a sanitize pass.
///
/// `position` is a char offset into the text the pass received, which may
/// differ from the original input once earlier passes have rewritten it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SanitizeLogEntry {
    pub position: usize,
    pub message: &'static str,
    pub context: String,
}

#[derive(Default)]
struct Logger {
    enable: bool,
    window: usize,
    entries: Vec<SanitizeLogEntry>,
}

impl Logger {
    fn new(opts: &Options) -> Self {
        Self {
            enable: opts.logging,
            window: opts.log_context_window,
            entries: Vec::new(),
        }
    }

    #[inline]
    fn log(&mut self, chars: &[char], position: usize, message: &'static str) {
        if self.enable {
            self.entries.push(SanitizeLogEntry {
                position,
                message,
                context: build_context(chars, position, self.window),
            });
        }
    }
}

#[inline]
fn build_context(chars: &[char], pos: usize, win: usize) -> String {
    let start = pos.saturating_sub(win);
    let end = (pos + win).min(chars.len());
    chars[start..end].iter().collect()
}

pub(crate) fn sanitize_with_options(raw: &str, opts: &Options) -> String {
    sanitize_with_log(raw, opts).0
}

pub(crate) fn sanitize_with_log(raw: &str, opts: &Options) -> (String, Vec<SanitizeLogEntry>) {
    let mut log = Logger::new(opts);
    let trimmed = trim_buffer(raw);
    if trimmed.is_empty() {
        return (String::new(), log.entries);
    }

    // Order matters: quote normalization must run before bare-key quoting,
    // terminator passes must see settled quote state, auto-close runs last.
    let mut value = trimmed.to_string();
    if opts.convert_single_quotes {
        value = convert_single_quotes(&value, &mut log);
    }
    if opts.quote_bare_keys {
        value = quote_bare_keys(&value, &mut log);
    }
    if opts.strip_semicolons {
        value = strip_semicolons(&value, &mut log);
    }
    if opts.strip_trailing_commas {
        value = strip_trailing_commas(&value, &mut log);
    }
    if opts.auto_close {
        value = auto_close_structures(&value, &mut log);
    }
    (value, log.entries)
}

#[inline]
fn push_double_quoted(out: &mut String, span: &str) {
    out.push('"');
    for c in span.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Pass 1: rewrite single-quoted segments as double-quoted segments.
///
/// Content already inside a double-quoted span is left alone. Within a
/// single-quoted span, `\'` collapses to `'`, other escapes are kept, and
/// embedded `"` gets escaped for the new delimiter. A span still open at
/// end-of-input is closed implicitly (a pending backslash is dropped).
fn convert_single_quotes(input: &str, log: &mut Logger) -> String {
    if memchr(b'\'', input.as_bytes()).is_none() {
        return input.to_string();
    }

    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 2);
    let mut span = String::new();
    let mut span_start = 0usize;
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_single {
            if escaped {
                if c == '\'' {
                    span.push('\'');
                } else {
                    span.push('\\');
                    span.push(c);
                }
                escaped = false;
                continue;
            }
            if c == '\\' {
                escaped = true;
                continue;
            }
            if c == '\'' {
                in_single = false;
                push_double_quoted(&mut out, &span);
                log.log(&chars, span_start, "converted single-quoted segment");
                span.clear();
                continue;
            }
            span.push(c);
            continue;
        }

        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        if c == '\\' {
            out.push(c);
            escaped = true;
            continue;
        }
        if c == '"' {
            in_double = !in_double;
            out.push(c);
            continue;
        }
        if c == '\'' && !in_double {
            in_single = true;
            span_start = i;
            span.clear();
            continue;
        }
        out.push(c);
    }

    if in_single {
        push_double_quoted(&mut out, &span);
        log.log(&chars, span_start, "closed unterminated single-quoted segment");
    }

    out
}

/// Matches `\s* key \s* :` starting at `i`, where `key` is an ASCII
/// identifier-shaped token. Returns the index just past the colon, the
/// leading whitespace (which survives the rewrite) and the key.
fn match_key(chars: &[char], i: usize) -> Option<(usize, String, String)> {
    let mut j = i;
    let mut ws = String::new();
    while j < chars.len() && is_whitespace(chars[j]) {
        ws.push(chars[j]);
        j += 1;
    }
    if j >= chars.len() || !is_key_start(chars[j]) {
        return None;
    }
    let mut key = String::new();
    while j < chars.len() && is_key_continue(chars[j]) {
        key.push(chars[j]);
        j += 1;
    }
    while j < chars.len() && is_whitespace(chars[j]) {
        j += 1;
    }
    if j < chars.len() && chars[j] == ':' {
        Some((j + 1, ws, key))
    } else {
        None
    }
}

#[inline]
fn push_quoted_key(out: &mut String, ws: &str, key: &str) {
    out.push_str(ws);
    out.push('"');
    out.push_str(key);
    out.push('"');
    out.push(':');
}

/// Pass 2: wrap bare object keys in double quotes.
///
/// Two anchoring sub-passes, matching the inline style (`{a: 1, b: 2}`)
/// and the key-on-its-own-line style. Deliberately not quote-aware; the
/// anchor-plus-identifier shape is the whole match condition.
fn quote_bare_keys(input: &str, log: &mut Logger) -> String {
    let inline = quote_keys_after_anchor(input, log);
    quote_keys_at_line_start(&inline, log)
}

fn quote_keys_after_anchor(input: &str, log: &mut Logger) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if c != '{' && c != ',' {
            continue;
        }
        if let Some((next, ws, key)) = match_key(&chars, i) {
            log.log(&chars, i + ws.chars().count(), "quoted bare object key");
            push_quoted_key(&mut out, &ws, &key);
            i = next;
        }
    }
    out
}

fn quote_keys_at_line_start(input: &str, log: &mut Logger) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0usize;
    let mut at_line_start = true;
    while i < chars.len() {
        if at_line_start {
            if let Some((next, ws, key)) = match_key(&chars, i) {
                log.log(&chars, i + ws.chars().count(), "quoted bare object key");
                push_quoted_key(&mut out, &ws, &key);
                i = next;
                at_line_start = false;
                continue;
            }
            at_line_start = false;
        }
        let c = chars[i];
        out.push(c);
        at_line_start = matches!(c, '\n' | '\r');
        i += 1;
    }
    out
}

/// Pass 3: drop a semicolon (outside quotes) whose next non-whitespace
/// character is end-of-input, a newline boundary, `}` or `]`.
fn strip_semicolons(input: &str, log: &mut Logger) -> String {
    if memchr(b';', input.as_bytes()).is_none() {
        return input.to_string();
    }

    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if escaped {
            out.push(c);
            escaped = false;
            i += 1;
            continue;
        }
        if c == '\\' {
            out.push(c);
            escaped = true;
            i += 1;
            continue;
        }
        if c == '"' && !in_single {
            in_double = !in_double;
            out.push(c);
            i += 1;
            continue;
        }
        if c == '\'' && !in_double {
            in_single = !in_single;
            out.push(c);
            i += 1;
            continue;
        }
        if !in_single && !in_double && c == ';' {
            let mut j = i + 1;
            while j < chars.len() && is_whitespace(chars[j]) {
                j += 1;
            }
            let next = chars.get(j).copied();
            if next.is_none() || matches!(next, Some('\n' | '\r' | '}' | ']')) {
                log.log(&chars, i, "removed loose semicolon");
                for &ws in &chars[i + 1..j] {
                    out.push(ws);
                }
                i = j;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

/// Pass 4: drop a comma (outside quotes) that is followed, modulo
/// whitespace, by a closing `}` or `]`.
fn strip_trailing_commas(input: &str, log: &mut Logger) -> String {
    if memchr(b',', input.as_bytes()).is_none() {
        return input.to_string();
    }

    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        if c == '\\' {
            out.push(c);
            escaped = true;
            continue;
        }
        if c == '"' && !in_single {
            in_double = !in_double;
            out.push(c);
            continue;
        }
        if c == '\'' && !in_double {
            in_single = !in_single;
            out.push(c);
            continue;
        }
        if !in_single && !in_double && c == ',' {
            let mut j = i + 1;
            while j < chars.len() && is_whitespace(chars[j]) {
                j += 1;
            }
            if matches!(chars.get(j), Some('}' | ']')) {
                log.log(&chars, i, "removed trailing comma");
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Pass 5: append closers for unmatched `{`/`[` in LIFO order.
///
/// Quoted spans and escaped characters are skipped while tracking the
/// stack; a stray closer that does not match the top of the stack is
/// ignored rather than popping a non-matching opener.
fn auto_close_structures(input: &str, log: &mut Logger) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut stack: Vec<char> = Vec::new();
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for &c in &chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == '"' && !in_single {
            in_double = !in_double;
            continue;
        }
        if c == '\'' && !in_double {
            in_single = !in_single;
            continue;
        }
        if in_single || in_double {
            continue;
        }
        match c {
            '{' | '[' => stack.push(c),
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                }
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    if stack.is_empty() {
        return input.to_string();
    }

    log.log(&chars, chars.len(), "closed unbalanced structures");
    let mut out = String::with_capacity(input.len() + stack.len());
    out.push_str(input);
    for &open in stack.iter().rev() {
        out.push(if open == '{' { '}' } else { ']' });
    }
    out
}
