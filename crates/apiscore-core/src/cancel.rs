//! Cooperative cancellation for long-running certifications.
//!
//! A `Cancellation` handle is shared between the driver (CLI signal
//! handler, editor host) and the pipeline. The pipeline never interrupts
//! an individual filesystem or network operation; it checks the flag at
//! step boundaries, so a cancelled run stops before the next stage and
//! leaves no partially-written staging artifacts behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent and callable from any thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_untripped() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let cancel = Cancellation::new();
        let shared = cancel.clone();

        shared.cancel();

        assert!(cancel.is_cancelled());
        assert!(shared.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let cancel = Cancellation::new();
        cancel.cancel();
        cancel.cancel();
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn cancel_crosses_threads() {
        let cancel = Cancellation::new();
        let remote = cancel.clone();

        std::thread::spawn(move || remote.cancel()).join().unwrap();

        assert!(cancel.is_cancelled());
    }
}
