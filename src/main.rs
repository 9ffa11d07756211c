//! Storefront bot - Telegram product catalog browser
//!
//! Users pick a platform, then a category, and receive product cards with
//! a purchase link. Navigation is a pure state machine; this binary wires
//! it to the Bot API and a JSON catalog.

mod caption;
mod catalog;
mod config;
mod messages;
mod navigation;
mod runtime;
mod session;
mod telegram;

use catalog::JsonFileCatalog;
use config::BotConfig;
use navigation::MenuTree;
use runtime::{poller, ProductionDispatcher, TelegramPresenter};
use session::SessionStore;
use std::sync::Arc;
use telegram::TelegramClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_bot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = BotConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let tree = Arc::new(MenuTree::storefront()?);

    let catalog = JsonFileCatalog::new(&config.catalog_path).with_known_categories(tree.category_ids());
    // The catalog is re-read per request; a bad file here is not fatal
    match catalog.load().await {
        Ok(products) => {
            tracing::info!(path = %catalog.path().display(), count = products.len(), "Catalog is readable");
        }
        Err(e) => tracing::warn!(error = %e, "Catalog check failed; categories will show a temporary error"),
    }
    if !tokio::fs::try_exists(&config.placeholder_image).await.unwrap_or(false) {
        tracing::warn!(
            path = %config.placeholder_image.display(),
            "Placeholder image not found; products without images are sent as text"
        );
    }

    let client = Arc::new(TelegramClient::new(&config.bot_token, &config.api_url)?);
    let presenter = TelegramPresenter::new(Arc::clone(&client));

    let sessions = Arc::new(SessionStore::new(config.session_idle_timeout));
    let cancel = CancellationToken::new();
    let sweeper = sessions.spawn_sweeper(cancel.clone());

    let dispatcher: Arc<ProductionDispatcher> = Arc::new(
        runtime::Dispatcher::new(tree, catalog, presenter, sessions)
            .with_placeholder_image(&config.placeholder_image),
    );

    // Shut down on Ctrl-C
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        tracing::info!("Shutdown requested");
        shutdown.cancel();
    });

    poller::poll_updates(&client, dispatcher, cancel).await;
    sweeper.await?;

    tracing::info!("Bot stopped");
    Ok(())
}
