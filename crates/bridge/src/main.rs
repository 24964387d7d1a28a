//! `popsync-bridge` -- embedded popup widget for a third-party page.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default | Description                               |
//! |-----------------|----------|---------|-------------------------------------------|
//! | `POPUP_API_URL` | no       | --      | Base URL of the API server; unset = inert |
//! | `RUST_LOG`      | no       | --      | Opt-in logs, sent to stderr               |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use popsync_bridge::tui::BridgeTui;
use popsync_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // No base URL means no network activity at all; the overlay stays
    // permanently Hidden.
    let client = ApiClient::from_env();
    match &client {
        Some(c) => tracing::info!(base_url = c.base_url(), "Starting popup widget"),
        None => tracing::info!("POPUP_API_URL unset; widget runs inert"),
    }

    let mut tui = BridgeTui::new(client)?;
    tui.run().await?;

    Ok(())
}
