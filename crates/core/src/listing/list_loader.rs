//! Load orchestrator for a single list screen.
//!
//! The loader drives one session per screen:
//! - Select the data source for the screen's [`ListKind`]
//! - Fetch, filter and project entities into rows
//! - Retry failed fetches while the context allows it
//! - Fall back to cached friends for premium users
//! - Hand the result (or the original error) to the presenter
//!
//! A `refresh` future is the session's serialized execution context: every
//! continuation, including cache reads, resumes inside it. Session state sits
//! behind a mutex that is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};

use log::{debug, error, info, warn};

use super::listing_context::{ListContext, ListKind};
use super::listing_traits::{ItemNavigator, ListPresenter};
use super::view_model::{project, ItemViewModel, SelectAction};
use crate::errors::{Error, Result, RetryClass};
use crate::items::{Friend, FriendsCache, ItemsSource, ListItem, UserSession};

/// The data sources a loader can pick from, one per entity kind.
#[derive(Clone)]
pub struct ItemSources {
    friends: Arc<dyn ItemsSource>,
    cards: Arc<dyn ItemsSource>,
    transfers: Arc<dyn ItemsSource>,
}

impl ItemSources {
    pub fn new(
        friends: Arc<dyn ItemsSource>,
        cards: Arc<dyn ItemsSource>,
        transfers: Arc<dyn ItemsSource>,
    ) -> Self {
        Self {
            friends,
            cards,
            transfers,
        }
    }

    /// The source backing `kind`. Both transfer lists share one source.
    pub fn for_kind(&self, kind: ListKind) -> &Arc<dyn ItemsSource> {
        match kind {
            ListKind::Friends => &self.friends,
            ListKind::Cards => &self.cards,
            ListKind::SentTransfers | ListKind::ReceivedTransfers => &self.transfers,
        }
    }
}

/// Where a session currently stands.
///
/// `Idle`, `Success`, `CacheResolved` and `Failed` have no fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Created, nothing loaded yet.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// A fetch failed and is about to be re-issued.
    RetryPending,
    /// Retries ran out; reading cached friends.
    Fallback,
    /// Live data was presented.
    Success,
    /// Cached friends were presented in place of live data.
    CacheResolved,
    /// An error was presented.
    Failed,
}

impl LoadState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Loading | Self::RetryPending | Self::Fallback)
    }
}

/// Result of a single `refresh` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Live entities were presented.
    Loaded { count: usize, attempts: u32 },
    /// Retries ran out and cached friends were presented instead.
    LoadedFromCache { count: usize, attempts: u32 },
    /// An error was presented.
    Failed { error: Error, attempts: u32 },
    /// Another refresh was still running; this call did nothing.
    AlreadyLoading,
    /// The screen was torn down while the fetch was in flight.
    Detached,
}

#[derive(Debug)]
struct Session {
    state: LoadState,
    retry_count: u32,
    items: Vec<ItemViewModel>,
}

/// Fetch/retry/fallback state machine for one list screen.
pub struct ListLoader {
    context: ListContext,
    sources: ItemSources,
    cache: Arc<dyn FriendsCache>,
    user: Arc<dyn UserSession>,
    presenter: RwLock<Option<Weak<dyn ListPresenter>>>,
    navigator: Weak<dyn ItemNavigator>,
    session: Mutex<Session>,
}

impl ListLoader {
    /// Creates a loader in the `Idle` state.
    ///
    /// The presenter and navigator are held weakly so the loader never keeps
    /// a torn-down screen alive.
    pub fn new(
        context: ListContext,
        sources: ItemSources,
        cache: Arc<dyn FriendsCache>,
        user: Arc<dyn UserSession>,
        presenter: Weak<dyn ListPresenter>,
        navigator: Weak<dyn ItemNavigator>,
    ) -> Self {
        Self {
            context,
            sources,
            cache,
            user,
            presenter: RwLock::new(Some(presenter)),
            navigator,
            session: Mutex::new(Session {
                state: LoadState::Idle,
                retry_count: 0,
                items: Vec::new(),
            }),
        }
    }

    pub fn context(&self) -> &ListContext {
        &self.context
    }

    pub fn state(&self) -> LoadState {
        self.lock_session().state
    }

    pub fn retry_count(&self) -> u32 {
        self.lock_session().retry_count
    }

    /// The rows from the last successful or cache-resolved load.
    pub fn items(&self) -> Vec<ItemViewModel> {
        self.lock_session().items.clone()
    }

    /// Teardown signal. Results that arrive afterwards are dropped.
    pub fn detach(&self) {
        debug!("Detaching {} list presenter", self.context.kind());
        *self
            .presenter
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Loads the list when the screen appears with no rows yet.
    ///
    /// Returns `None` when rows are already shown.
    pub async fn appear(&self) -> Option<LoadOutcome> {
        let empty = self.lock_session().items.is_empty();
        if empty {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Runs the selection action of the row at `index`.
    ///
    /// Returns false when there is no such row.
    pub fn select(&self, index: usize) -> bool {
        let row = self.lock_session().items.get(index).cloned();
        match row {
            Some(row) => {
                row.select();
                true
            }
            None => {
                debug!("Ignoring selection of missing row {}", index);
                false
            }
        }
    }

    /// Starts the flow behind the screen's primary bar action.
    pub fn primary_action(&self) {
        if let Some(navigator) = self.navigator.upgrade() {
            navigator.open(self.context.kind().primary_action());
        }
    }

    /// Fetches the list and presents the result.
    ///
    /// Always restarts from `Loading`, whatever the previous terminal state.
    /// A call made while another refresh is still in flight is ignored.
    pub async fn refresh(&self) -> LoadOutcome {
        let kind = self.context.kind();
        let Some(_in_flight) = self.begin_loading() else {
            debug!("Refresh of {} ignored, a load is already in flight", kind);
            return LoadOutcome::AlreadyLoading;
        };

        if let Some(presenter) = self.presenter() {
            presenter.set_refreshing(true);
        }

        let source = self.sources.for_kind(kind).clone();
        let mut attempts = 0;

        let outcome = loop {
            attempts += 1;
            self.transition(LoadState::Loading);
            info!(
                "Loading {} from '{}' (attempt {})",
                kind,
                source.id(),
                attempts
            );

            let fetched = self.fetch(source.as_ref()).await;
            if self.presenter().is_none() {
                break self.abandon();
            }

            let projected = fetched.and_then(|items| {
                let rows = self.project_all(&items)?;
                Ok((items, rows))
            });
            let error = match projected {
                Ok((items, rows)) => break self.finish_success(&items, rows, attempts),
                Err(error) => error,
            };

            if error.retry_class() == RetryClass::Never {
                if error.is_contract_violation() {
                    error!("Cannot display {} list: {}", kind, error);
                } else {
                    warn!("Loading {} failed permanently: {}", kind, error);
                }
                self.reset_retries();
                break self.finish_failed(error, attempts);
            }

            if self.schedule_retry() {
                warn!(
                    "Loading {} failed: {}, retrying ({}/{})",
                    kind,
                    error,
                    self.retry_count(),
                    self.context.max_retry_count()
                );
                continue;
            }

            break self.recover(error, attempts).await;
        };

        if let Some(presenter) = self.presenter() {
            presenter.set_refreshing(false);
        }
        outcome
    }

    /// Issues one fetch and keeps the entities this list shows.
    ///
    /// Any source failure is reported as a transient fetch error for this
    /// list, since both transfer lists share one source.
    async fn fetch(&self, source: &dyn ItemsSource) -> Result<Vec<ListItem>> {
        let kind = self.context.kind();
        let items = source.load().await.map_err(|e| match e {
            Error::Fetch { message, .. } => Error::Fetch { kind, message },
            other => Error::fetch(kind, other.to_string()),
        })?;

        let total = items.len();
        let kept: Vec<ListItem> = items.into_iter().filter(|item| kind.retains(item)).collect();
        if kept.len() != total {
            debug!("Kept {} of {} entities for {}", kept.len(), total, kind);
        }
        Ok(kept)
    }

    fn project_all(&self, items: &[ListItem]) -> Result<Vec<ItemViewModel>> {
        items
            .iter()
            .map(|item| {
                let on_select = SelectAction::show_details(item.clone(), self.navigator.clone());
                project(item, &self.context, on_select)
            })
            .collect()
    }

    /// Retries are spent; try cached friends before giving up.
    async fn recover(&self, fetch_error: Error, attempts: u32) -> LoadOutcome {
        let kind = self.context.kind();
        if kind != ListKind::Friends || !self.user.is_premium() {
            warn!("Loading {} failed after {} attempts: {}", kind, attempts, fetch_error);
            return self.finish_failed(fetch_error, attempts);
        }

        self.transition(LoadState::Fallback);
        warn!(
            "Loading {} failed after {} attempts: {}, falling back to cache",
            kind, attempts, fetch_error
        );

        let cached = self.cache.load_friends().await;
        if self.presenter().is_none() {
            return self.abandon();
        }

        let friends = match cached {
            Ok(friends) if !friends.is_empty() => friends,
            Ok(_) => {
                debug!("Friends cache is empty");
                return self.finish_failed(fetch_error, attempts);
            }
            Err(cache_error) => {
                debug!("Friends cache unavailable: {}", cache_error);
                return self.finish_failed(fetch_error, attempts);
            }
        };

        let items: Vec<ListItem> = friends.into_iter().map(ListItem::Friend).collect();
        match self.project_all(&items) {
            Ok(rows) => {
                let count = rows.len();
                info!("Presenting {} cached friends", count);
                self.store_rows(LoadState::CacheResolved, rows);
                LoadOutcome::LoadedFromCache { count, attempts }
            }
            Err(error) => self.finish_failed(error, attempts),
        }
    }

    fn finish_success(
        &self,
        items: &[ListItem],
        rows: Vec<ItemViewModel>,
        attempts: u32,
    ) -> LoadOutcome {
        let kind = self.context.kind();
        if kind == ListKind::Friends && self.user.is_premium() {
            let friends: Vec<Friend> = items
                .iter()
                .filter_map(|i| i.as_friend().cloned())
                .collect();
            self.cache.save(friends);
        }

        let count = rows.len();
        info!("Loaded {} {} rows after {} attempts", count, kind, attempts);
        self.reset_retries();
        self.store_rows(LoadState::Success, rows);
        LoadOutcome::Loaded { count, attempts }
    }

    fn finish_failed(&self, error: Error, attempts: u32) -> LoadOutcome {
        self.transition(LoadState::Failed);
        if let Some(presenter) = self.presenter() {
            presenter.present_error(&error);
        }
        LoadOutcome::Failed { error, attempts }
    }

    /// A result arrived after teardown. Drop it and return to `Idle`.
    fn abandon(&self) -> LoadOutcome {
        debug!("{} list was detached, dropping result", self.context.kind());
        let mut session = self.lock_session();
        session.state = LoadState::Idle;
        session.retry_count = 0;
        LoadOutcome::Detached
    }

    fn store_rows(&self, state: LoadState, rows: Vec<ItemViewModel>) {
        {
            let mut session = self.lock_session();
            session.state = state;
            session.items = rows.clone();
        }
        if let Some(presenter) = self.presenter() {
            presenter.present(&rows);
        }
    }

    fn begin_loading(&self) -> Option<InFlightGuard<'_>> {
        let mut session = self.lock_session();
        if session.state.is_in_flight() {
            return None;
        }
        session.state = LoadState::Loading;
        Some(InFlightGuard { loader: self })
    }

    /// Spends one retry if the context allows it. Otherwise resets the
    /// counter for the next refresh.
    fn schedule_retry(&self) -> bool {
        let mut session = self.lock_session();
        if self.context.allows_retry(session.retry_count) {
            session.retry_count += 1;
            session.state = LoadState::RetryPending;
            true
        } else {
            session.retry_count = 0;
            false
        }
    }

    fn reset_retries(&self) {
        self.lock_session().retry_count = 0;
    }

    fn transition(&self, state: LoadState) {
        let mut session = self.lock_session();
        if session.state != state {
            debug!("{} list: {:?} -> {:?}", self.context.kind(), session.state, state);
            session.state = state;
        }
    }

    fn presenter(&self) -> Option<Arc<dyn ListPresenter>> {
        self.presenter
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .and_then(Weak::upgrade)
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| {
            warn!("List session mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Held by a running `refresh`. If the future is dropped before reaching a
/// terminal state, the session goes back to `Idle` so the next refresh can
/// start.
struct InFlightGuard<'a> {
    loader: &'a ListLoader,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let cancelled = {
            let mut session = self.loader.lock_session();
            if session.state.is_in_flight() {
                session.state = LoadState::Idle;
                session.retry_count = 0;
                true
            } else {
                false
            }
        };

        if cancelled {
            debug!("Refresh of {} list was cancelled", self.loader.context.kind());
            if let Some(presenter) = self.loader.presenter() {
                presenter.set_refreshing(false);
            }
        }
    }
}
