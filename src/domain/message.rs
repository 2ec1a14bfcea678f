//! Message and favorite types as served by the upstream JSON endpoints.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

/// A single user message. `id` is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,
    pub from: String,
    pub message: String,
}

/// Set of message ids the user marked as favorite.
///
/// Decodes from a JSON array of integers; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FavoriteSet(HashSet<i64>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
