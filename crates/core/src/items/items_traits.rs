//! Collaborator contracts for fetching and caching list entities.
//!
//! Transport clients, cache stores and the authenticated session live outside
//! this crate. The loader only talks to them through these traits.

use async_trait::async_trait;

use super::items_model::{Friend, ListItem};
use crate::errors::Result;

/// A remote source of list entities, one per entity kind.
///
/// Any error returned from [`load`](Self::load) is treated as a transient
/// fetch failure and is subject to the screen's retry policy.
#[async_trait]
pub trait ItemsSource: Send + Sync {
    /// Identifier used in logs (e.g. "FRIENDS_API").
    fn id(&self) -> &'static str;

    /// Fetch the full entity list. Resolves exactly once.
    async fn load(&self) -> Result<Vec<ListItem>>;
}

/// Local store of previously loaded friends.
#[async_trait]
pub trait FriendsCache: Send + Sync {
    /// Replaces the cached friends.
    ///
    /// Fire-and-forget: implementations must not block and must not fail the
    /// caller. Persistence errors are the store's own concern.
    fn save(&self, friends: Vec<Friend>);

    /// Reads the cached friends.
    ///
    /// Returns [`Error::CacheUnavailable`](crate::Error::CacheUnavailable)
    /// when nothing was cached or the store could not be read.
    async fn load_friends(&self) -> Result<Vec<Friend>>;
}

/// The currently authenticated user, read synchronously.
pub trait UserSession: Send + Sync {
    /// Premium users get offline fallback to cached friends.
    fn is_premium(&self) -> bool;
}
