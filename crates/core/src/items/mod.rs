//! Items module - list entities and the collaborators that supply them.

mod items_memory;
mod items_model;
mod items_traits;

pub use items_memory::{InMemoryFriendsCache, StaticItemsSource, StaticUserSession};
pub use items_model::{Card, EntityKind, Friend, ListItem, Transfer};
pub use items_traits::{FriendsCache, ItemsSource, UserSession};
