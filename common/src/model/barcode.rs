//! Keystroke accumulator for hardware barcode scanners.
//!
//! Scanners type a whole code as a fast burst of key presses followed by
//! `Enter`. The accumulator collects keys until `Enter`; the owner runs a
//! debounce timer of [`IDLE_RESET_MS`] that is restarted on every key press,
//! `Enter` included, and calls [`ScanAccumulator::expire_idle`] when it fires,
//! so a slow gap (someone typing by hand) throws away what was collected so
//! far.
//!
//! Each key press issues a new [`IdleTicket`]. Only the timer armed with the
//! latest ticket may clear the buffer; a timer armed by an earlier key is
//! stale even if it still manages to fire.

use serde::Serialize;

/// Idle gap after which a partial burst is discarded.
pub const IDLE_RESET_MS: u32 = 100;

/// `KeyboardEvent.key` value that terminates a scan.
pub const SCAN_TERMINATOR: &str = "Enter";

/// A completed scan, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeScan {
    pub barcode: String,
}

/// What the input element should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key appended to the buffer; let the browser handle it normally.
    Accumulated,
    /// `Enter` closed a non-empty burst. The caller notifies subscribers, then
    /// clears the input text and suppresses the default `Enter` action.
    Completed(BarcodeScan),
    /// `Enter` with nothing collected. Nothing to emit, default untouched.
    Ignored,
}

/// Identifies the idle timer armed by one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTicket(u64);

#[derive(Debug, Default)]
pub struct ScanAccumulator {
    buffer: String,
    generation: u64,
}

impl ScanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one `KeyboardEvent.key`. Every key, including `Enter`, supersedes
    /// the pending idle timer; the owner re-arms it with [`Self::idle_ticket`].
    ///
    /// Keys are appended verbatim, so non-printing keys such as `"Shift"`
    /// end up in the buffer as their names.
    pub fn handle_key(&mut self, key: &str) -> KeyOutcome {
        self.generation += 1;
        if key != SCAN_TERMINATOR {
            self.buffer.push_str(key);
            return KeyOutcome::Accumulated;
        }

        if self.buffer.is_empty() {
            return KeyOutcome::Ignored;
        }

        KeyOutcome::Completed(BarcodeScan {
            barcode: std::mem::take(&mut self.buffer),
        })
    }

    /// Ticket for the idle timer armed after the latest key press.
    pub fn idle_ticket(&self) -> IdleTicket {
        IdleTicket(self.generation)
    }

    /// Called when an idle timer fires. Returns `false` without touching the
    /// buffer when a later key press superseded `ticket`.
    ///
    /// Only the buffer is cleared; the characters already typed into the
    /// input stay visible.
    pub fn expire_idle(&mut self, ticket: IdleTicket) -> bool {
        if ticket != self.idle_ticket() {
            return false;
        }
        self.buffer.clear();
        true
    }

    /// Drops any partial burst and invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.buffer.clear();
    }

    #[cfg(test)]
    fn buffer(&self) -> &str {
        &self.buffer
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(barcode: &str) -> KeyOutcome {
        KeyOutcome::Completed(BarcodeScan {
            barcode: barcode.to_string(),
        })
    }

    /// Drives an accumulator the way the page does: each key re-arms a single
    /// idle timer, which fires once `IDLE_RESET_MS` pass without a key.
    #[derive(Default)]
    struct Timeline {
        acc: ScanAccumulator,
        pending: Option<(u64, IdleTicket)>,
    }

    impl Timeline {
        fn press(&mut self, at_ms: u64, key: &str) -> KeyOutcome {
            self.advance(at_ms);
            let outcome = self.acc.handle_key(key);
            self.pending = Some((at_ms + u64::from(IDLE_RESET_MS), self.acc.idle_ticket()));
            outcome
        }

        fn advance(&mut self, to_ms: u64) {
            if let Some((due, ticket)) = self.pending {
                if due <= to_ms {
                    self.pending = None;
                    self.acc.expire_idle(ticket);
                }
            }
        }
    }

    #[test]
    fn burst_then_enter_completes() {
        let mut acc = ScanAccumulator::new();
        for key in ["A", "B", "C"] {
            assert_eq!(acc.handle_key(key), KeyOutcome::Accumulated);
        }
        assert_eq!(acc.buffer(), "ABC");
        assert_eq!(acc.handle_key("Enter"), scan("ABC"));
        assert!(acc.is_idle());
    }

    #[test]
    fn idle_gap_drops_leading_keys() {
        let mut timeline = Timeline::default();
        timeline.press(0, "A");
        timeline.press(150, "B");
        assert_eq!(timeline.press(160, "Enter"), scan("B"));
    }

    #[test]
    fn every_key_restarts_the_idle_timer() {
        // Each gap is under the idle window although the burst spans 240ms.
        let mut timeline = Timeline::default();
        for (at_ms, key) in [(0, "7"), (60, "5"), (120, "0"), (180, "1")] {
            assert_eq!(timeline.press(at_ms, key), KeyOutcome::Accumulated);
        }
        assert_eq!(timeline.press(240, "Enter"), scan("7501"));
    }

    #[test]
    fn enter_restarts_the_idle_timer_too() {
        let mut acc = ScanAccumulator::new();
        acc.handle_key("A");
        let armed = acc.idle_ticket();
        acc.handle_key("Enter");
        assert_ne!(acc.idle_ticket(), armed);
        assert!(!acc.expire_idle(armed));

        let armed = acc.idle_ticket();
        assert_eq!(acc.handle_key("Enter"), KeyOutcome::Ignored);
        assert!(!acc.expire_idle(armed));
    }

    #[test]
    fn idle_window_counts_from_the_last_key() {
        let mut timeline = Timeline::default();
        timeline.press(0, "A");
        assert_eq!(timeline.press(80, "Enter"), scan("A"));
        timeline.press(90, "B");
        // The timer armed by "B" has not run out at 185ms.
        timeline.advance(185);
        assert_eq!(timeline.acc.buffer(), "B");
        timeline.advance(190);
        assert!(timeline.acc.is_idle());
    }

    #[test]
    fn stale_ticket_leaves_buffer_alone() {
        let mut acc = ScanAccumulator::new();
        acc.handle_key("A");
        let first = acc.idle_ticket();
        acc.handle_key("B");
        assert!(!acc.expire_idle(first));
        assert_eq!(acc.buffer(), "AB");
        assert!(acc.expire_idle(acc.idle_ticket()));
        assert!(acc.is_idle());
    }

    #[test]
    fn idle_expiry_does_not_complete_a_scan() {
        // Expiry only empties the buffer: the next Enter has nothing to emit,
        // so the typed text is neither cleared nor the key suppressed.
        let mut timeline = Timeline::default();
        timeline.press(0, "7");
        timeline.advance(100);
        assert!(timeline.acc.is_idle());
        assert_eq!(timeline.press(300, "Enter"), KeyOutcome::Ignored);
    }

    #[test]
    fn reset_drops_burst_and_outstanding_ticket() {
        let mut acc = ScanAccumulator::new();
        acc.handle_key("A");
        let ticket = acc.idle_ticket();
        acc.reset();
        assert!(acc.is_idle());
        assert!(!acc.expire_idle(ticket));
    }

    #[test]
    fn enter_on_empty_buffer_is_ignored() {
        let mut acc = ScanAccumulator::new();
        assert_eq!(acc.handle_key("Enter"), KeyOutcome::Ignored);

        acc.handle_key("7");
        assert!(acc.expire_idle(acc.idle_ticket()));
        assert_eq!(acc.handle_key("Enter"), KeyOutcome::Ignored);
    }

    #[test]
    fn consecutive_scans_are_independent() {
        let mut acc = ScanAccumulator::new();
        for key in ["7", "5", "0", "1", "Enter"] {
            acc.handle_key(key);
        }
        for key in ["4", "2"] {
            acc.handle_key(key);
        }
        assert_eq!(acc.handle_key("Enter"), scan("42"));
    }

    #[test]
    fn named_keys_are_appended_verbatim() {
        let mut acc = ScanAccumulator::new();
        acc.handle_key("Shift");
        acc.handle_key("A");
        assert_eq!(acc.handle_key("Enter"), scan("ShiftA"));
    }

    #[test]
    fn scan_serializes_with_barcode_field() {
        let payload = serde_json::to_string(&BarcodeScan {
            barcode: "7501055300075".to_string(),
        })
        .unwrap();
        assert_eq!(payload, r#"{"barcode":"7501055300075"}"#);
    }
}
