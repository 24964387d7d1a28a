//! `popsync-dashboard` -- operator terminal UI for the popup state.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default                 | Description                 |
//! |-----------------|----------|-------------------------|-----------------------------|
//! | `POPUP_API_URL` | no       | `http://127.0.0.1:3000` | Base URL of the API server  |
//! | `RUST_LOG`      | no       | --                      | Opt-in logs, sent to stderr |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use popsync_client::ApiClient;
use popsync_dashboard::tui::DashboardTui;

/// API deployment used when `POPUP_API_URL` is unset.
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Raw mode owns stdout; opt-in logs go to stderr so `2>dashboard.log`
    // captures them without corrupting the screen.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let client =
        ApiClient::from_env().unwrap_or_else(|| ApiClient::new(DEFAULT_API_URL));
    tracing::info!(base_url = client.base_url(), "Starting popup dashboard");

    let mut tui = DashboardTui::new(client)?;
    tui.run().await?;

    Ok(())
}
