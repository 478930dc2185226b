use std::time::{Duration, Instant};

/// Coalescing window for typing snapshots: edits closer together than
/// this merge into the same checkpoint.
pub const TYPING_SNAPSHOT_WINDOW: Duration = Duration::from_millis(450);

/// How a buffer change should be recorded in the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Default-insertion keystrokes; bursts coalesce into one checkpoint.
    Typing,
    /// Explicit commands (format, auto-pair, indent); always a fresh checkpoint.
    Command,
}

/// Result of an undo/redo step: the restored buffer and where the caret
/// should land (the previous caret clamped to the new buffer length).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStep {
    pub buffer: String,
    pub caret: usize,
}

/// Linear undo/redo over buffer snapshots with time-bucketed typing.
///
/// One instance per field, constructed at field mount. The stack always
/// holds at least one entry and consecutive entries are never equal.
/// The coalescing window is evaluated lazily against wall-clock time;
/// nothing here schedules callbacks.
#[derive(Debug)]
pub struct EditHistory {
    stack: Vec<String>,
    index: usize,
    last_typing: Option<Instant>,
    window: Duration,
}

impl EditHistory {
    pub fn new(seed: &str) -> Self {
        Self::with_window(seed, TYPING_SNAPSHOT_WINDOW)
    }

    pub fn with_window(seed: &str, window: Duration) -> Self {
        Self {
            stack: vec![seed.to_owned()],
            index: 0,
            last_typing: None,
            window,
        }
    }

    /// Buffer at the current position in history.
    pub fn current(&self) -> &str {
        &self.stack[self.index]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.stack.len()
    }

    /// Record a new buffer value. A no-op when `next` equals the current
    /// snapshot. Recording while undone discards the redo future first.
    pub fn record(&mut self, next: &str, mode: HistoryMode) {
        self.record_at(next, mode, Instant::now());
    }

    pub(crate) fn record_at(&mut self, next: &str, mode: HistoryMode, now: Instant) {
        if self.stack[self.index] == next {
            return;
        }
        if self.index + 1 < self.stack.len() {
            self.stack.truncate(self.index + 1);
        }

        match mode {
            HistoryMode::Command => {
                self.push(next);
                self.last_typing = Some(now);
            }
            HistoryMode::Typing => {
                let fresh = self
                    .last_typing
                    .is_none_or(|t| now.duration_since(t) > self.window);
                if fresh {
                    self.push(next);
                    self.last_typing = Some(now);
                } else if let Some(last) = self.stack.last_mut() {
                    // Merge the burst into the checkpoint opened at most
                    // one window ago instead of one entry per keystroke.
                    *last = next.to_owned();
                    self.index = self.stack.len() - 1;
                }
            }
        }
    }

    /// Step back one checkpoint. `None` at the beginning of history.
    /// Disarms the typing timer so post-undo typing opens a fresh
    /// checkpoint instead of merging into the restored one.
    pub fn undo(&mut self, caret: usize) -> Option<HistoryStep> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.step(caret))
    }

    /// Step forward one checkpoint. `None` at the end of history.
    pub fn redo(&mut self, caret: usize) -> Option<HistoryStep> {
        if self.index + 1 >= self.stack.len() {
            return None;
        }
        self.index += 1;
        Some(self.step(caret))
    }

    /// Reseed when the authoritative external buffer changed through a
    /// path this history did not produce (field cleared or repopulated
    /// by the parent). Returns whether a reset happened.
    pub fn sync(&mut self, external: &str) -> bool {
        if self.stack[self.index] == external {
            return false;
        }
        self.stack.clear();
        self.stack.push(external.to_owned());
        self.index = 0;
        self.last_typing = None;
        true
    }

    fn push(&mut self, next: &str) {
        self.stack.push(next.to_owned());
        self.index = self.stack.len() - 1;
    }

    fn step(&mut self, caret: usize) -> HistoryStep {
        self.last_typing = None;
        let buffer = self.stack[self.index].clone();
        let caret = caret.min(buffer.chars().count());
        HistoryStep { buffer, caret }
    }
}
