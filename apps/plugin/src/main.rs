//! RecentDeck plugin entry point.

mod action;
mod args;
mod connection;
mod settings;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::action::{Dispatcher, SteamLauncher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging. Stream Deck hosts capture stderr
    // into the plugin log directory.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,recentdeck=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting RecentDeck plugin"
    );

    let args = args::parse(std::env::args().skip(1))?;
    tracing::debug!(port = args.port, info = %args.info, "host launch arguments");

    let mut conn = connection::Connection::open(&args).await?;

    let mut dispatcher = Dispatcher::new(
        conn.out_tx.clone(),
        Arc::new(recentdeck_steam::Client::new()),
        Arc::new(recentdeck_artwork::IconClient::new()),
        Arc::new(SteamLauncher),
    );

    // The host serialises callbacks; one sequential loop is the whole
    // event model.
    while let Some(event) = conn.inbound_rx.recv().await {
        dispatcher.handle(event).await;
    }

    tracing::info!("host connection closed, exiting");
    Ok(())
}
