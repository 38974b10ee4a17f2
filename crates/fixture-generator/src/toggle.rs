//! Boolean alternation state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static SHARED: OnceLock<BoolToggle> = OnceLock::new();

/// Two-state toggle behind boolean generation.
///
/// Each [`next`](BoolToggle::next) returns the negation of the previous
/// result, so consecutive booleans drawn from one toggle strictly alternate.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct BoolToggle {
    last: Arc<AtomicBool>,
}

impl BoolToggle {
    /// Fresh toggle; its first value is `true`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide toggle. Never reset between generator calls.
    pub fn shared() -> Self {
        SHARED.get_or_init(BoolToggle::new).clone()
    }

    /// Flip and return the new value.
    pub fn next(&self) -> bool {
        !self.last.fetch_xor(true, Ordering::SeqCst)
    }

    /// Make the next value `true` again.
    pub fn reset(&self) {
        self.last.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates() {
        let toggle = BoolToggle::new();
        let one = toggle.next();
        let two = toggle.next();
        let three = toggle.next();
        let four = toggle.next();

        assert!(one);
        assert_ne!(one, two);
        assert_eq!(one, three);
        assert_eq!(two, four);
    }

    #[test]
    fn test_clones_share_state() {
        let toggle = BoolToggle::new();
        let other = toggle.clone();

        assert!(toggle.next());
        assert!(!other.next());
    }

    #[test]
    fn test_reset() {
        let toggle = BoolToggle::new();
        toggle.next();
        toggle.reset();
        assert!(toggle.next());
    }
}
