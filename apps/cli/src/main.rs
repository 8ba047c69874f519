mod config;
mod fixtures;
mod terminal;

use std::sync::Arc;

use config::Config;
use fixtures::Fixtures;
use iacc_core::items::{FriendsCache, InMemoryFriendsCache, StaticUserSession};
use iacc_core::listing::{ItemNavigator, ListPresenter};
use iacc_core::{ListContext, ListLoader};
use terminal::TerminalScreen;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    tracing::debug!(?config, "Loaded configuration");

    let fixtures = Fixtures::load(config.fixtures_path.as_deref())?;

    let cache = Arc::new(InMemoryFriendsCache::new());
    if config.warm_cache {
        cache.save(fixtures.friends.clone());
    }

    let screen = Arc::new(TerminalScreen::new(config.list));
    let presenter: Arc<dyn ListPresenter> = screen.clone();
    let navigator: Arc<dyn ItemNavigator> = screen.clone();
    let loader = ListLoader::new(
        ListContext::for_kind(config.list),
        fixtures.into_sources(config.failures, config.latency),
        cache,
        Arc::new(StaticUserSession {
            premium: config.premium,
        }),
        Arc::downgrade(&presenter),
        Arc::downgrade(&navigator),
    );

    screen.print_header();
    if let Some(outcome) = loader.appear().await {
        tracing::info!(?outcome, "Initial load finished");
    }

    if let Some(index) = config.select {
        if !loader.select(index) {
            tracing::warn!("No row {} to select", index);
        }
    }

    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("IACC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
