//! Response ordering for overlapping fetches
//!
//! Every fetch on a state slot is tagged with a sequence number when it is
//! issued. A response is applied only if no newer response has already been
//! applied to the same slot, so overlapping requests resolve
//! deterministically without cancelling anything in flight.

/// Per-slot sequence bookkeeping
///
/// Lives inside the slot's state and is only touched under that state's
/// write lock, so plain integers are enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceGate {
    issued: u64,
    applied: u64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new fetch; numbers start at 1 and only grow
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record a resolved response.
    ///
    /// Returns `false` (and records nothing) when a newer response has
    /// already been applied to this slot.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq < self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    /// True if `seq` is the most recently issued fetch
    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }

    pub fn last_applied(&self) -> u64 {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let mut gate = SequenceGate::new();
        assert_eq!(gate.issue(), 1);
        assert_eq!(gate.issue(), 2);
        assert_eq!(gate.issue(), 3);
        assert!(gate.is_latest(3));
        assert!(!gate.is_latest(2));
    }

    #[test]
    fn test_older_response_after_newer_is_rejected() {
        let mut gate = SequenceGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(gate.accept(second));
        assert!(!gate.accept(first));
        assert_eq!(gate.last_applied(), second);
    }

    #[test]
    fn test_in_order_responses_are_both_applied() {
        let mut gate = SequenceGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(gate.accept(first));
        assert!(gate.accept(second));
        assert_eq!(gate.last_applied(), 2);
    }
}
