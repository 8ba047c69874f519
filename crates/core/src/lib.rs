//! iACC Core - list screen loading, projection and formatting.
//!
//! One reusable list screen shows four kinds of items: friends, cards, sent
//! transfers and received transfers. This crate holds everything behind that
//! screen except the widgets themselves.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   ListContext    |  (kind, retry policy, date style)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    ListLoader    | --> |   ItemsSource    |  (one per entity kind)
//! +------------------+     +------------------+
//!          |   \
//!          |    \--------> +------------------+
//!          |               |   FriendsCache   |  (premium fallback)
//!          v               +------------------+
//! +------------------+
//! |     project      |  (ListItem -> ItemViewModel)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  ListPresenter   |  (rows or error)
//! +------------------+
//! ```
//!
//! Transport clients, cache stores, the user session and navigation are
//! supplied by the host through the traits in [`items`] and [`listing`].

pub mod errors;
pub mod formatting;
pub mod items;
pub mod listing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use items::{Card, EntityKind, Friend, ListItem, Transfer};
pub use listing::{
    ItemSources, ItemViewModel, ListContext, ListKind, ListLoader, LoadOutcome, LoadState,
};
