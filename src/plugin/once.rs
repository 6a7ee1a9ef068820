//! Fire-once gate

use core::sync::atomic::{AtomicBool, Ordering};

/// A flag that lets exactly one caller through over its lifetime
#[derive(Debug, Default)]
pub struct FireOnce {
    fired: AtomicBool,
}

impl FireOnce {
    /// Create an unfired gate
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` for the first call only
    #[inline]
    pub fn fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the gate has already fired
    #[must_use]
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fires_once() {
        let gate = FireOnce::new();
        assert!(!gate.has_fired());
        assert!(gate.fire());
        assert!(!gate.fire());
        assert!(gate.has_fired());
    }

    #[test]
    fn fires_once_across_threads() {
        let gate = Arc::new(FireOnce::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || gate.fire())
            })
            .collect();

        let fired = handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .filter(|&fired| fired)
            .count();
        assert_eq!(fired, 1);
    }
}
