use crate::error::ParseError;
use crate::history::{EditHistory, HistoryMode, HistoryStep};
use crate::keys::{KeyDecision, KeyEvent, Selection, char_len, decide};
use crate::options::Options;
use crate::status::{MetadataStatus, classify, format_with_options, parse_error};

/// State the host should render after a handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub buffer: String,
    pub status: MetadataStatus,
    pub selection: Selection,
}

/// One metadata field session: buffer, status, and undo history.
///
/// Owned per field instance, constructed at mount and discarded at
/// teardown. Every operation runs synchronously to completion; the host
/// feeds events in and renders the returned state.
#[derive(Debug)]
pub struct MetadataField {
    buffer: String,
    status: MetadataStatus,
    history: EditHistory,
    opts: Options,
}

impl MetadataField {
    pub fn new(initial: &str) -> Self {
        Self::with_options(initial, Options::default())
    }

    pub fn with_options(initial: &str, opts: Options) -> Self {
        Self {
            buffer: initial.to_owned(),
            status: classify(initial),
            history: EditHistory::new(initial),
            opts,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn status(&self) -> MetadataStatus {
        self.status
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Strict-parse failure behind an `Invalid` status, for host messaging.
    pub fn last_parse_error(&self) -> Option<ParseError> {
        parse_error(&self.buffer)
    }

    /// Host change notification for default insertion: install the new
    /// buffer, reclassify, and record a typing snapshot.
    pub fn apply_input(&mut self, next: &str) -> MetadataStatus {
        self.install(next.to_owned(), Some(HistoryMode::Typing));
        self.status
    }

    /// Run the keystroke interceptor and apply its decision. `None`
    /// means the event was not intercepted and the host should perform
    /// default insertion (then call [`MetadataField::apply_input`]).
    pub fn handle_key(&mut self, event: &KeyEvent, selection: Selection) -> Option<FieldUpdate> {
        match decide(event, &self.buffer, selection) {
            KeyDecision::Pass => None,
            KeyDecision::Undo => {
                let step = self.undo(selection.start);
                Some(self.after_step(step, selection))
            }
            KeyDecision::Redo => {
                let step = self.redo(selection.start);
                Some(self.after_step(step, selection))
            }
            KeyDecision::Edit {
                buffer,
                selection,
                mode,
            } => {
                self.install(buffer, Some(mode));
                Some(self.update(selection))
            }
            KeyDecision::MoveCaret(sel) => Some(self.update(sel)),
        }
    }

    /// Step back in history; updates buffer and status when a step exists.
    pub fn undo(&mut self, caret: usize) -> Option<HistoryStep> {
        let step = self.history.undo(caret)?;
        self.restore(&step);
        Some(step)
    }

    /// Step forward in history; updates buffer and status when a step exists.
    pub fn redo(&mut self, caret: usize) -> Option<HistoryStep> {
        let step = self.history.redo(caret)?;
        self.restore(&step);
        Some(step)
    }

    /// Format button: canonicalize with repair. On failure the status is
    /// forced to `Invalid` and `false` returned so the host can surface
    /// an error message.
    pub fn format_action(&mut self) -> bool {
        if crate::classify::trim_buffer(&self.buffer).is_empty() {
            return false;
        }
        match format_with_options(&self.buffer, true, &self.opts) {
            Some(formatted) => {
                self.install(formatted, Some(HistoryMode::Command));
                true
            }
            None => {
                self.status = MetadataStatus::Invalid;
                false
            }
        }
    }

    /// Blur: best-effort format-with-repair when the buffer is non-empty
    /// and not already valid. Failure leaves the buffer untouched.
    pub fn blur(&mut self) {
        if crate::classify::trim_buffer(&self.buffer).is_empty()
            || self.status == MetadataStatus::Valid
        {
            return;
        }
        if let Some(formatted) = format_with_options(&self.buffer, true, &self.opts) {
            self.install(formatted, Some(HistoryMode::Command));
        }
    }

    /// External reset: the authoritative value changed outside this
    /// session (field cleared or repopulated by the parent).
    pub fn sync(&mut self, external: &str) {
        self.history.sync(external);
        self.buffer = external.to_owned();
        self.status = classify(external);
    }

    fn install(&mut self, next: String, record: Option<HistoryMode>) {
        if let Some(mode) = record {
            self.history.record(&next, mode);
        }
        self.status = classify(&next);
        self.buffer = next;
    }

    fn restore(&mut self, step: &HistoryStep) {
        self.status = classify(&step.buffer);
        self.buffer = step.buffer.clone();
    }

    fn after_step(&self, step: Option<HistoryStep>, fallback: Selection) -> FieldUpdate {
        match step {
            Some(step) => {
                let caret = step.caret;
                self.update(Selection::caret(caret))
            }
            // Clamped at a history boundary: the event is still consumed,
            // nothing changes.
            None => self.update(fallback.clamp(char_len(&self.buffer))),
        }
    }

    fn update(&self, selection: Selection) -> FieldUpdate {
        FieldUpdate {
            buffer: self.buffer.clone(),
            status: self.status,
            selection,
        }
    }
}
