//! Plain-text presentation of a snapshot.

use std::fmt::Write;

use crate::domain::Snapshot;

pub const FAVORITE_MARK: &str = "♥";

/// Render every message, one per line, marking favorites.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::from("Messages\n");
    if snapshot.messages.is_empty() {
        out.push_str("  (no messages)\n");
        return out;
    }
    for (message, favorite) in snapshot.entries() {
        let mark = if favorite { FAVORITE_MARK } else { " " };
        let _ = writeln!(out, "{} {}: {}", mark, message.from, message.message);
    }
    out
}
