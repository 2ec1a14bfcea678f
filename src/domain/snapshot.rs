//! The combined pair handed to the presentation layer once per trigger.

use serde::Serialize;
use crate::domain::{FavoriteSet, Message};

/// Messages together with the favorites fetched in the same join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    pub favorites: FavoriteSet,
}

impl Snapshot {
    pub fn new(messages: Vec<Message>, favorites: FavoriteSet) -> Self {
        Self { messages, favorites }
    }

    /// Whether the given message is in this snapshot's favorite set.
    pub fn is_favorite(&self, message: &Message) -> bool {
        self.favorites.contains(message.id)
    }

    /// Iterate messages paired with their favorite flag, in fetch order.
    pub fn entries(&self) -> impl Iterator<Item = (&Message, bool)> {
        self.messages.iter().map(move |m| (m, self.is_favorite(m)))
    }
}

impl From<(Vec<Message>, FavoriteSet)> for Snapshot {
    fn from((messages, favorites): (Vec<Message>, FavoriteSet)) -> Self {
        Self::new(messages, favorites)
    }
}
