use crate::classify::{closing_for, opening_for};
use crate::history::HistoryMode;

/// Indent unit inserted on Tab.
pub const INDENT: &str = "  ";

/// Active selection/caret in the host editing surface, as char offsets
/// into the buffer with `start <= end`. A collapsed selection is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_caret(self) -> bool {
        self.start == self.end
    }

    pub fn clamp(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Tab,
}

/// Modifier state for a key event. `primary` is the platform undo
/// modifier (Ctrl, or Cmd on macOS); `shift` turns undo into redo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn char(c: char) -> Self {
        Self::plain(Key::Char(c))
    }
}

/// Outcome of intercepting one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDecision {
    /// Not intercepted; the host performs default insertion and reports
    /// the resulting buffer as a typing snapshot.
    Pass,
    Undo,
    Redo,
    /// Replace the buffer, place the selection, and record a checkpoint.
    Edit {
        buffer: String,
        selection: Selection,
        mode: HistoryMode,
    },
    /// Suppress insertion and move the caret; the buffer did not change,
    /// so nothing is recorded.
    MoveCaret(Selection),
}

/// Decide whether to override default insertion for one key event.
///
/// Pure in `(event, buffer, selection)`; all persistent state lives in
/// [`crate::EditHistory`]. Auto-pairing is checked before skip-over, so a
/// quote key always pairs rather than skipping an existing closer.
pub fn decide(event: &KeyEvent, buffer: &str, selection: Selection) -> KeyDecision {
    let mods = event.modifiers;

    if mods.primary {
        if let Key::Char(c) = event.key
            && c.eq_ignore_ascii_case(&'z')
        {
            return if mods.shift {
                KeyDecision::Redo
            } else {
                KeyDecision::Undo
            };
        }
        return KeyDecision::Pass;
    }
    if mods.alt {
        return KeyDecision::Pass;
    }

    let sel = selection.clamp(char_len(buffer));

    match event.key {
        Key::Tab => {
            let next = splice(buffer, sel, INDENT);
            let caret = sel.start + char_len(INDENT);
            KeyDecision::Edit {
                buffer: next,
                selection: Selection::caret(caret),
                mode: HistoryMode::Command,
            }
        }
        Key::Char(c) => {
            if let Some(close) = closing_for(c) {
                // The single-preceding-char escape check misjudges runs of
                // backslashes; kept as-is to match the host behavior.
                if c == '"' && char_before(buffer, sel.start) == Some('\\') {
                    return KeyDecision::Pass;
                }
                let selected = slice(buffer, sel);
                let mut insertion = String::with_capacity(selected.len() + 2);
                insertion.push(c);
                insertion.push_str(selected);
                insertion.push(close);
                let next = splice(buffer, sel, &insertion);
                let start = sel.start + 1;
                let end = start + (sel.end - sel.start);
                return KeyDecision::Edit {
                    buffer: next,
                    selection: Selection { start, end },
                    mode: HistoryMode::Command,
                };
            }

            if opening_for(c).is_some()
                && sel.is_caret()
                && char_at(buffer, sel.start) == Some(c)
                && char_before(buffer, sel.start) != Some('\\')
            {
                return KeyDecision::MoveCaret(Selection::caret(sel.start + 1));
            }

            KeyDecision::Pass
        }
    }
}

#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[inline]
fn byte_at(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map_or(s.len(), |(b, _)| b)
}

#[inline]
fn char_at(s: &str, idx: usize) -> Option<char> {
    s.chars().nth(idx)
}

#[inline]
fn char_before(s: &str, idx: usize) -> Option<char> {
    idx.checked_sub(1).and_then(|i| s.chars().nth(i))
}

fn slice(s: &str, sel: Selection) -> &str {
    &s[byte_at(s, sel.start)..byte_at(s, sel.end)]
}

/// Replace the selected char range with `insert`, copy-on-write.
pub(crate) fn splice(s: &str, sel: Selection, insert: &str) -> String {
    let a = byte_at(s, sel.start);
    let b = byte_at(s, sel.end);
    let mut out = String::with_capacity(s.len() + insert.len());
    out.push_str(&s[..a]);
    out.push_str(insert);
    out.push_str(&s[b..]);
    out
}
