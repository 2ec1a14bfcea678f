//! Starting joins and tracking the one in flight.

use std::future::Future;
use std::sync::{Arc, Mutex};
use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::oneshot;
use tracing::Instrument;
use uuid::Uuid;

use crate::join::handle::{CancelHandle, InFlightJoin, JoinState, Progress};
use crate::join::latch::{lock, Latch};
use crate::observability::tracing::join_span;

/// Start two legs concurrently and deliver both results together.
///
/// Each closure is invoked once, inside its own task. Must be called from
/// within a Tokio runtime.
pub fn join_two<A, B, FA, FB, FutA, FutB>(fetch_a: FA, fetch_b: FB) -> InFlightJoin<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
    FA: FnOnce() -> FutA + Send + 'static,
    FB: FnOnce() -> FutB + Send + 'static,
    FutA: Future<Output = A> + Send + 'static,
    FutB: Future<Output = B> + Send + 'static,
{
    let id = Uuid::new_v4();
    let progress = Arc::new(Progress::new(id, 2));
    let (tx, rx) = oneshot::channel();
    let latch: Arc<Latch<(Option<A>, Option<B>), (A, B)>> = Arc::new(Latch::new(
        progress.clone(),
        (None, None),
        |(a, b)| Some((a?, b?)),
        tx,
    ));

    tracing::debug!(join_id = %id, legs = 2, "Join started");
    let legs = vec![
        spawn_leg(id, 0, latch.clone(), fetch_a, |slots, a| slots.0 = Some(a)),
        spawn_leg(id, 1, latch, fetch_b, |slots, b| slots.1 = Some(b)),
    ];

    InFlightJoin::new(rx, CancelHandle::new(progress, legs))
}

/// Start every leg concurrently and deliver all results, in input order.
///
/// An empty input delivers an empty vector immediately.
pub fn join_all<T, F, Fut>(legs: Vec<F>) -> InFlightJoin<Vec<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let id = Uuid::new_v4();
    let total = legs.len();
    let progress = Arc::new(Progress::new(id, total));
    let (tx, rx) = oneshot::channel();
    let slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    let latch: Arc<Latch<Vec<Option<T>>, Vec<T>>> = Arc::new(Latch::new(
        progress.clone(),
        slots,
        |slots| slots.into_iter().collect(),
        tx,
    ));

    tracing::debug!(join_id = %id, legs = total, "Join started");
    if total == 0 {
        latch.deliver();
    }

    let handles = legs
        .into_iter()
        .enumerate()
        .map(|(index, leg)| {
            spawn_leg(id, index, latch.clone(), leg, move |slots: &mut Vec<Option<T>>, value| {
                slots[index] = Some(value);
            })
        })
        .collect();

    InFlightJoin::new(rx, CancelHandle::new(progress, handles))
}

fn spawn_leg<S, T, V, F, Fut>(
    join_id: Uuid,
    index: usize,
    latch: Arc<Latch<S, T>>,
    leg: F,
    fill: impl FnOnce(&mut S, V) + Send + 'static,
) -> AbortHandle
where
    S: Send + 'static,
    T: Send + 'static,
    V: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = V> + Send + 'static,
{
    let (abort_handle, abort_registration) = AbortHandle::new_pair();

    tokio::spawn(
        async move {
            match Abortable::new(leg(), abort_registration).await {
                Ok(value) => {
                    latch.settle(|slots| fill(slots, value));
                    tracing::trace!("Leg settled");
                }
                Err(_aborted) => {
                    tracing::debug!("Leg cancelled");
                }
            }
        }
        .instrument(join_span(join_id, index)),
    );

    abort_handle
}

/// Owns the in-flight join: starting a new one cancels the previous.
#[derive(Debug, Default)]
pub struct Joiner {
    current: Mutex<Option<CancelHandle>>,
}

impl Joiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`join_two`], superseding any join this joiner started earlier.
    pub fn join_two<A, B, FA, FB, FutA, FutB>(&self, fetch_a: FA, fetch_b: FB) -> InFlightJoin<(A, B)>
    where
        A: Send + 'static,
        B: Send + 'static,
        FA: FnOnce() -> FutA + Send + 'static,
        FB: FnOnce() -> FutB + Send + 'static,
        FutA: Future<Output = A> + Send + 'static,
        FutB: Future<Output = B> + Send + 'static,
    {
        let join = join_two(fetch_a, fetch_b);
        self.track(join.cancel_handle());
        join
    }

    /// [`join_all`], superseding any join this joiner started earlier.
    pub fn join_all<T, F, Fut>(&self, legs: Vec<F>) -> InFlightJoin<Vec<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let join = join_all(legs);
        self.track(join.cancel_handle());
        join
    }

    /// Cancel the current join, if any is still outstanding.
    pub fn cancel(&self) -> bool {
        match lock(&self.current).as_ref() {
            Some(handle) if !handle.status().state().is_terminal() => handle.cancel(),
            _ => false,
        }
    }

    /// State of the most recently started join.
    pub fn state(&self) -> JoinState {
        lock(&self.current)
            .as_ref()
            .map_or(JoinState::Idle, |handle| handle.status().state())
    }

    fn track(&self, handle: CancelHandle) {
        let new_id = handle.status().id();
        let previous = lock(&self.current).replace(handle);
        if let Some(previous) = previous {
            if previous.cancel() {
                tracing::info!(
                    join_id = %previous.status().id(),
                    superseded_by = %new_id,
                    "Cancelled stale in-flight join"
                );
            }
        }
    }
}

impl Drop for Joiner {
    fn drop(&mut self) {
        self.cancel();
    }
}
