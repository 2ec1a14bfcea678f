//! Countdown latch shared by the legs of one join.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

use crate::join::handle::Progress;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result slots `S` for every leg, combined into `T` once all have settled.
pub(crate) struct Latch<S, T> {
    progress: Arc<Progress>,
    slots: Mutex<Option<S>>,
    finish: fn(S) -> Option<T>,
    tx: Mutex<Option<oneshot::Sender<T>>>,
}

impl<S, T> Latch<S, T> {
    pub(crate) fn new(
        progress: Arc<Progress>,
        slots: S,
        finish: fn(S) -> Option<T>,
        tx: oneshot::Sender<T>,
    ) -> Self {
        Self {
            progress,
            slots: Mutex::new(Some(slots)),
            finish,
            tx: Mutex::new(Some(tx)),
        }
    }

    /// Record one leg's value. The last leg to settle delivers.
    pub(crate) fn settle(&self, fill: impl FnOnce(&mut S)) {
        if let Some(slots) = lock(&self.slots).as_mut() {
            fill(slots);
        }
        if self.progress.count_down() {
            self.deliver();
        }
    }

    /// Combine the slots and send. Runs at most once; later calls find
    /// the slots already taken.
    pub(crate) fn deliver(&self) {
        let slots = lock(&self.slots).take();
        let tx = lock(&self.tx).take();
        if let (Some(slots), Some(tx)) = (slots, tx) {
            if let Some(value) = (self.finish)(slots) {
                // The receiver may already be gone (consumer dropped the join).
                let _ = tx.send(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn pair_latch(
        progress: Arc<Progress>,
    ) -> (Latch<(Option<u32>, Option<String>), (u32, String)>, oneshot::Receiver<(u32, String)>) {
        let (tx, rx) = oneshot::channel();
        let latch = Latch::new(progress, (None, None), |(a, b)| Some((a?, b?)), tx);
        (latch, rx)
    }

    #[test]
    fn test_delivers_only_after_last_settle() {
        let progress = Arc::new(Progress::new(Uuid::new_v4(), 2));
        let (latch, mut rx) = pair_latch(progress.clone());

        latch.settle(|s| s.1 = Some("b".to_string()));
        assert!(rx.try_recv().is_err());

        latch.settle(|s| s.0 = Some(7));
        assert_eq!(rx.try_recv().unwrap(), (7, "b".to_string()));
    }

    #[test]
    fn test_deliver_twice_sends_once() {
        let progress = Arc::new(Progress::new(Uuid::new_v4(), 0));
        let (tx, mut rx) = oneshot::channel();
        let latch: Latch<Vec<Option<u8>>, Vec<u8>> =
            Latch::new(progress, Vec::new(), |s| s.into_iter().collect(), tx);
        latch.deliver();
        latch.deliver();
        assert_eq!(rx.try_recv().unwrap(), Vec::<u8>::new());
    }
}
