//! File-backed data sources standing in for the remote APIs.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use iacc_core::items::ItemsSource;
use iacc_core::{Card, Error, Friend, ItemSources, ListItem, ListKind, Transfer};
use serde::Deserialize;

const SAMPLE_FIXTURES: &str = include_str!("../fixtures/sample.json");

/// Entities served by the demo sources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub friends: Vec<Friend>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

impl Fixtures {
    /// Reads fixtures from `path`, or the bundled sample when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let raw = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fixtures from {}", path.display()))?,
            None => SAMPLE_FIXTURES.to_string(),
        };
        serde_json::from_str(&raw).context("Fixtures are not valid JSON")
    }

    /// Builds one source per entity kind. Every source fails its first
    /// `failures` fetches.
    pub fn into_sources(self, failures: u32, latency: Duration) -> ItemSources {
        let source = |id: &'static str, kind: ListKind, items: Vec<ListItem>| -> Arc<dyn ItemsSource> {
            Arc::new(FlakySource::new(id, kind, items, failures, latency))
        };

        ItemSources::new(
            source(
                "FRIENDS_API",
                ListKind::Friends,
                self.friends.into_iter().map(ListItem::Friend).collect(),
            ),
            source(
                "CARDS_API",
                ListKind::Cards,
                self.cards.into_iter().map(ListItem::Card).collect(),
            ),
            source(
                "TRANSFERS_API",
                ListKind::SentTransfers,
                self.transfers.into_iter().map(ListItem::Transfer).collect(),
            ),
        )
    }
}

/// Serves fixed entities after a delay, failing the first few requests.
pub struct FlakySource {
    id: &'static str,
    kind: ListKind,
    items: Vec<ListItem>,
    remaining_failures: AtomicU32,
    latency: Duration,
}

impl FlakySource {
    pub fn new(
        id: &'static str,
        kind: ListKind,
        items: Vec<ListItem>,
        failures: u32,
        latency: Duration,
    ) -> Self {
        Self {
            id,
            kind,
            items,
            remaining_failures: AtomicU32::new(failures),
            latency,
        }
    }
}

#[async_trait]
impl ItemsSource for FlakySource {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn load(&self) -> iacc_core::Result<Vec<ListItem>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            tracing::debug!(source = self.id, "Simulating a failed request");
            return Err(Error::fetch(self.kind, "simulated network failure"));
        }

        Ok(self.items.clone())
    }
}
