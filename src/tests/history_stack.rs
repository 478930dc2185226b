use super::*;
use std::time::{Duration, Instant};

fn history(seed: &str) -> EditHistory {
    EditHistory::new(seed)
}

#[test]
fn seeds_with_one_entry() {
    let h = history("x");
    assert_eq!(h.depth(), 1);
    assert_eq!(h.current(), "x");
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn first_typing_record_pushes_then_burst_coalesces() {
    let mut h = history("x");
    let t0 = Instant::now();
    h.record_at("xy", HistoryMode::Typing, t0);
    h.record_at("xyz", HistoryMode::Typing, t0 + Duration::from_millis(10));
    assert_eq!(h.depth(), 2);
    assert_eq!(h.current(), "xyz");
    let step = h.undo(3).unwrap();
    assert_eq!(step.buffer, "x");
}

#[test]
fn typing_after_window_opens_new_checkpoint() {
    let mut h = history("x");
    let t0 = Instant::now();
    h.record_at("xy", HistoryMode::Typing, t0);
    h.record_at("xyz", HistoryMode::Typing, t0 + Duration::from_millis(500));
    assert_eq!(h.depth(), 3);
}

#[test]
fn coalescing_measures_from_checkpoint_start() {
    // Merges do not re-arm the timer; a burst ends one window after the
    // checkpoint opened, not one window after the last keystroke.
    let mut h = history("");
    let t0 = Instant::now();
    h.record_at("a", HistoryMode::Typing, t0);
    h.record_at("ab", HistoryMode::Typing, t0 + Duration::from_millis(300));
    h.record_at("abc", HistoryMode::Typing, t0 + Duration::from_millis(600));
    assert_eq!(h.depth(), 3);
}

#[test]
fn command_always_pushes() {
    let mut h = history("x");
    let t0 = Instant::now();
    h.record_at("a", HistoryMode::Command, t0);
    h.record_at("b", HistoryMode::Command, t0 + Duration::from_millis(1));
    assert_eq!(h.depth(), 3);
}

#[test]
fn command_rearms_typing_timer() {
    let mut h = history("x");
    let t0 = Instant::now();
    h.record_at("a", HistoryMode::Command, t0);
    h.record_at("ab", HistoryMode::Typing, t0 + Duration::from_millis(10));
    // Within the window of the command checkpoint: the burst merges.
    assert_eq!(h.depth(), 2);
    assert_eq!(h.current(), "ab");
}

#[test]
fn noop_record_is_ignored() {
    let mut h = history("x");
    h.record("x", HistoryMode::Command);
    h.record("x", HistoryMode::Typing);
    assert_eq!(h.depth(), 1);
}

#[test]
fn undo_redo_round_trip_with_caret_clamp() {
    let mut h = history("");
    h.record("hello", HistoryMode::Command);
    let step = h.undo(5).unwrap();
    assert_eq!(step.buffer, "");
    assert_eq!(step.caret, 0);
    let step = h.redo(0).unwrap();
    assert_eq!(step.buffer, "hello");
    assert_eq!(step.caret, 0);
}

#[test]
fn undo_redo_clamp_silently_at_bounds() {
    let mut h = history("x");
    assert!(h.undo(0).is_none());
    assert!(h.redo(0).is_none());
    assert_eq!(h.current(), "x");
}

#[test]
fn new_edit_truncates_redo_future() {
    let mut h = history("");
    h.record("x", HistoryMode::Command);
    h.record("y", HistoryMode::Command);
    h.undo(1).unwrap();
    assert_eq!(h.current(), "x");
    h.record("z", HistoryMode::Typing);
    assert_eq!(h.depth(), 3);
    assert_eq!(h.current(), "z");
    // "y" is gone for good.
    assert!(h.redo(0).is_none());
}

#[test]
fn typing_after_undo_starts_fresh_checkpoint() {
    let mut h = history("");
    let t0 = Instant::now();
    h.record_at("x", HistoryMode::Command, t0);
    h.undo(1).unwrap();
    // Immediately typing again must not overwrite the restored entry.
    h.record_at("a", HistoryMode::Typing, t0 + Duration::from_millis(1));
    assert_eq!(h.depth(), 2);
    let step = h.undo(1).unwrap();
    assert_eq!(step.buffer, "");
}

#[test]
fn caret_clamps_to_char_length_not_bytes() {
    let mut h = history("");
    h.record("héllo", HistoryMode::Command);
    h.undo(0).unwrap();
    let step = h.redo(99).unwrap();
    assert_eq!(step.caret, 5);
}

#[test]
fn external_reset_reseeds_stack() {
    let mut h = history("a");
    h.record("ab", HistoryMode::Command);
    assert!(h.sync("from outside"));
    assert_eq!(h.depth(), 1);
    assert_eq!(h.current(), "from outside");
    assert!(h.undo(0).is_none());
}

#[test]
fn sync_with_current_value_is_noop() {
    let mut h = history("a");
    h.record("ab", HistoryMode::Command);
    assert!(!h.sync("ab"));
    assert_eq!(h.depth(), 2);
    assert!(h.can_undo());
}

#[test]
fn custom_window_is_respected() {
    let mut h = EditHistory::with_window("", Duration::from_millis(5));
    let t0 = Instant::now();
    h.record_at("a", HistoryMode::Typing, t0);
    h.record_at("ab", HistoryMode::Typing, t0 + Duration::from_millis(6));
    assert_eq!(h.depth(), 3);
}
