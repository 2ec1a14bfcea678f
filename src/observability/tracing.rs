//! Span helpers for join legs.

use tracing::Span;
use uuid::Uuid;

/// Span wrapping one leg's task, so every event it emits carries the join id.
pub fn join_span(join_id: Uuid, leg: usize) -> Span {
    tracing::debug_span!("leg", join_id = %join_id, leg)
}
