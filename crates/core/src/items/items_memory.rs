//! In-memory collaborators for tests and local runs.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::{debug, warn};

use super::items_model::{Friend, ListItem};
use super::items_traits::{FriendsCache, ItemsSource, UserSession};
use crate::errors::{Error, Result};

/// Friends cache kept in process memory.
///
/// An empty cache (never saved, or saved with no friends) reads back as
/// [`Error::CacheUnavailable`].
#[derive(Default)]
pub struct InMemoryFriendsCache {
    friends: Mutex<Option<Vec<Friend>>>,
}

impl InMemoryFriendsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated with `friends`.
    pub fn with_friends(friends: Vec<Friend>) -> Self {
        Self {
            friends: Mutex::new(Some(friends)),
        }
    }

    /// Returns a copy of the cached friends, if any.
    pub fn snapshot(&self) -> Option<Vec<Friend>> {
        self.lock_friends().clone()
    }

    fn lock_friends(&self) -> MutexGuard<'_, Option<Vec<Friend>>> {
        self.friends.lock().unwrap_or_else(|poisoned| {
            warn!("Friends cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl FriendsCache for InMemoryFriendsCache {
    fn save(&self, friends: Vec<Friend>) {
        debug!("Caching {} friends", friends.len());
        *self.lock_friends() = Some(friends);
    }

    async fn load_friends(&self) -> Result<Vec<Friend>> {
        match self.lock_friends().as_ref() {
            Some(friends) if !friends.is_empty() => Ok(friends.clone()),
            Some(_) => Err(Error::CacheUnavailable("cache is empty".to_string())),
            None => Err(Error::CacheUnavailable(
                "no friends have been cached".to_string(),
            )),
        }
    }
}

/// A user whose tier never changes during the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticUserSession {
    pub premium: bool,
}

impl StaticUserSession {
    pub fn premium() -> Self {
        Self { premium: true }
    }

    pub fn basic() -> Self {
        Self { premium: false }
    }
}

impl UserSession for StaticUserSession {
    fn is_premium(&self) -> bool {
        self.premium
    }
}

/// A source that always resolves to the same entities.
pub struct StaticItemsSource {
    id: &'static str,
    items: Vec<ListItem>,
}

impl StaticItemsSource {
    pub fn new(id: &'static str, items: Vec<ListItem>) -> Self {
        Self { id, items }
    }
}

#[async_trait]
impl ItemsSource for StaticItemsSource {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn load(&self) -> Result<Vec<ListItem>> {
        Ok(self.items.clone())
    }
}
