//! Favorites: the saved quotes of a session and how they are persisted

mod manager;
mod view;

pub use manager::{Backing, FavoritesManager, SaveOutcome, SaveStatus, SAVED_ACKNOWLEDGMENT};
pub use view::{filter_by_tag, order_for_display, tag_counts};
