//! In-flight join handle, cancellation and observable state.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use futures_util::future::AbortHandle;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::observability::metrics;

const LIVE: u8 = 0;
const DELIVERED: u8 = 1;
const CANCELLED: u8 = 2;

/// Observable state of one join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    /// No join has been started.
    Idle,
    /// Every leg is still running.
    Pending { total: usize },
    /// Some, but not all, legs have settled.
    PartiallySettled { settled: usize, total: usize },
    /// All legs settled; the combined value awaits the consumer.
    Settled,
    /// The consumer received the combined value.
    Delivered,
    /// Cancelled before delivery. No value will be observed.
    Cancelled,
}

impl JoinState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JoinState::Delivered | JoinState::Cancelled)
    }
}

/// Shared counters for one join.
#[derive(Debug)]
pub(crate) struct Progress {
    id: Uuid,
    total: usize,
    remaining: AtomicUsize,
    outcome: AtomicU8,
}

impl Progress {
    pub(crate) fn new(id: Uuid, total: usize) -> Self {
        Self {
            id,
            total,
            remaining: AtomicUsize::new(total),
            outcome: AtomicU8::new(LIVE),
        }
    }

    /// Count one settled leg; true for the leg that brought it to zero.
    pub(crate) fn count_down(&self) -> bool {
        self.remaining.fetch_sub(1, Ordering::AcqRel) == 1
    }

    fn finish(&self, outcome: u8) -> bool {
        self.outcome
            .compare_exchange(LIVE, outcome, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn state(&self) -> JoinState {
        match self.outcome.load(Ordering::Acquire) {
            DELIVERED => return JoinState::Delivered,
            CANCELLED => return JoinState::Cancelled,
            _ => {}
        }
        let remaining = self.remaining.load(Ordering::Acquire);
        if remaining == 0 {
            JoinState::Settled
        } else if remaining == self.total {
            JoinState::Pending { total: self.total }
        } else {
            JoinState::PartiallySettled {
                settled: self.total - remaining,
                total: self.total,
            }
        }
    }
}

/// Read-only view of a join's progress.
#[derive(Debug, Clone)]
pub struct JoinStatus(Arc<Progress>);

impl JoinStatus {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn state(&self) -> JoinState {
        self.0.state()
    }
}

/// Cancels every leg of one join. Cloneable; any clone may cancel.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    progress: Arc<Progress>,
    legs: Arc<[AbortHandle]>,
}

impl CancelHandle {
    pub(crate) fn new(progress: Arc<Progress>, legs: Vec<AbortHandle>) -> Self {
        Self {
            progress,
            legs: legs.into(),
        }
    }

    /// Abort all outstanding legs and suppress delivery.
    ///
    /// Returns false if the join was already delivered or cancelled.
    pub fn cancel(&self) -> bool {
        if !self.progress.finish(CANCELLED) {
            return false;
        }
        for leg in self.legs.iter() {
            leg.abort();
        }
        tracing::debug!(join_id = %self.progress.id, "Join cancelled");
        metrics::record_cancelled();
        true
    }

    pub fn status(&self) -> JoinStatus {
        JoinStatus(self.progress.clone())
    }
}

/// A running join. Await [`InFlightJoin::wait`] for the combined value.
///
/// Dropping the handle before delivery cancels the join.
#[derive(Debug)]
pub struct InFlightJoin<T> {
    rx: oneshot::Receiver<T>,
    cancel: CancelHandle,
}

impl<T> InFlightJoin<T> {
    pub(crate) fn new(rx: oneshot::Receiver<T>, cancel: CancelHandle) -> Self {
        Self { rx, cancel }
    }

    pub fn id(&self) -> Uuid {
        self.cancel.progress.id
    }

    pub fn state(&self) -> JoinState {
        self.cancel.progress.state()
    }

    pub fn status(&self) -> JoinStatus {
        self.cancel.status()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) -> bool {
        self.cancel.cancel()
    }

    /// Wait for every leg to settle.
    ///
    /// Returns `None` if the join was cancelled, in which case no value is
    /// ever observed even if the legs had already finished.
    pub async fn wait(mut self) -> Option<T> {
        let value = (&mut self.rx).await.ok()?;
        if !self.cancel.progress.finish(DELIVERED) {
            return None;
        }
        tracing::debug!(join_id = %self.id(), legs = self.cancel.progress.total, "Join delivered");
        metrics::record_delivery();
        Some(value)
    }
}

impl<T> Drop for InFlightJoin<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
