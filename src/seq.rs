//! Sequence numbers and request references.
//!
//! `Seq` is stamped by the sender on every message and is only a loss and
//! reorder detector, never an acknowledgment. `Ref` (r17.1) pairs a request
//! with the response the device sends back.

use tracing::debug;

/// Outcome of checking a received `Seq` against the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqCheck {
    /// Matched the expected value.
    InOrder,
    /// Did not match; the tracker resynchronised to `got + 1`.
    Gap { expected: u16, got: u16 },
    /// Not tracked (r17.1 `Error` messages sent with `Seq == 0`).
    Ignored,
}

/// Per-session `Seq` bookkeeping for both directions.
#[derive(Debug, Clone, Default)]
pub struct SeqTracker {
    last_tx: u16,
    /// `None` until the first inbound message sets the baseline.
    expected_rx: Option<u16>,
    gaps: u64,
}

impl SeqTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next `Seq` for an outbound message. The first message carries 1.
    pub fn next_tx(&mut self) -> u16 {
        self.last_tx = self.last_tx.wrapping_add(1);
        self.last_tx
    }

    /// Check an inbound `Seq` and advance the expected value. The first
    /// inbound `Seq` is always in order.
    pub fn observe_rx(&mut self, seq: u16) -> SeqCheck {
        let expected = self.expected_rx.unwrap_or(seq);
        self.expected_rx = Some(seq.wrapping_add(1));
        if seq == expected {
            return SeqCheck::InOrder;
        }
        self.gaps += 1;
        debug!(expected, got = seq, "rx seq gap, resynchronising");
        SeqCheck::Gap { expected, got: seq }
    }

    /// `Seq` the next inbound message should carry, once one has arrived.
    pub fn expected_rx(&self) -> Option<u16> {
        self.expected_rx
    }

    /// Number of mismatches seen so far.
    pub fn gaps(&self) -> u64 {
        self.gaps
    }
}

/// Wrapping allocator for r17.1 `Ref` values.
#[derive(Debug, Clone, Default)]
pub struct RefCounter {
    last: u16,
}

impl RefCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next reference. The first call returns 1.
    pub fn next(&mut self) -> u16 {
        self.last = self.last.wrapping_add(1);
        self.last
    }

    /// Most recently allocated reference (0 before any allocation).
    pub fn last(&self) -> u16 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_seq_starts_at_one_and_wraps() {
        let mut t = SeqTracker::new();
        assert_eq!(t.next_tx(), 1);
        assert_eq!(t.next_tx(), 2);
        t.last_tx = u16::MAX - 1;
        assert_eq!(t.next_tx(), u16::MAX);
        assert_eq!(t.next_tx(), 0);
    }

    #[test]
    fn rx_in_order() {
        let mut t = SeqTracker::new();
        assert_eq!(t.expected_rx(), None);
        for seq in 0..5 {
            assert_eq!(t.observe_rx(seq), SeqCheck::InOrder);
        }
        assert_eq!(t.expected_rx(), Some(5));
        assert_eq!(t.gaps(), 0);
    }

    #[test]
    fn rx_gap_resynchronises() {
        let mut t = SeqTracker::new();
        assert_eq!(t.observe_rx(0), SeqCheck::InOrder);
        assert_eq!(t.observe_rx(7), SeqCheck::Gap { expected: 1, got: 7 });
        assert_eq!(t.observe_rx(8), SeqCheck::InOrder);
        // A stale (reordered) message is a gap as well.
        assert_eq!(t.observe_rx(3), SeqCheck::Gap { expected: 9, got: 3 });
        assert_eq!(t.expected_rx(), Some(4));
        assert_eq!(t.gaps(), 2);
    }

    #[test]
    fn first_rx_sets_baseline() {
        let mut t = SeqTracker::new();
        assert_eq!(t.observe_rx(412), SeqCheck::InOrder);
        assert_eq!(t.observe_rx(413), SeqCheck::InOrder);
        assert_eq!(t.gaps(), 0);
        assert_eq!(t.observe_rx(415), SeqCheck::Gap { expected: 414, got: 415 });
    }

    #[test]
    fn rx_wraps() {
        let mut t = SeqTracker::new();
        assert_eq!(t.observe_rx(u16::MAX), SeqCheck::InOrder);
        assert_eq!(t.observe_rx(0), SeqCheck::InOrder);
    }

    #[test]
    fn ref_counter_wraps() {
        let mut r = RefCounter::new();
        assert_eq!(r.last(), 0);
        assert_eq!(r.next(), 1);
        r.last = u16::MAX;
        assert_eq!(r.next(), 0);
    }
}
