use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use voltdesk::api::{Credentials, FixtureApi};
use voltdesk::config::Config;
use voltdesk::list::{ListState, Viewport};
use voltdesk::logging::init_tracing;
use voltdesk::notify::ChannelNotifier;
use voltdesk::selectors;
use voltdesk::Client;

/// Headless voltdesk session against recorded API fixtures.
///
/// Logs in, loads the profile and scrolls the documents list to the end,
/// then prints the final state tree as JSON.
#[derive(Debug, Parser)]
#[command(name = "voltdesk", version, about)]
struct Cli {
    /// JSON fixture file served as the remote API.
    #[arg(long)]
    fixtures: PathBuf,

    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "demo")]
    username: String,

    #[arg(long, default_value = "demo", env = "VOLTDESK_PASSWORD", hide_env_values = true)]
    password: String,

    /// Upper bound on scroll-triggered page loads.
    #[arg(long, default_value_t = 100)]
    max_pages: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;

    let api = FixtureApi::from_path(&cli.fixtures)
        .with_context(|| format!("loading fixtures from {}", cli.fixtures.display()))?;
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let client = Client::bootstrap(config, Arc::new(api), Arc::new(notifier))?;

    if let Some(Err(err)) = client.start().await {
        tracing::warn!(error = %err, "Continuing without translations");
    }

    let credentials = Credentials::new(cli.username.clone(), cli.password.clone());
    match client.actions().login(credentials).await {
        Some(Ok(_)) => {}
        Some(Err(err)) => bail!("login failed: {}", err),
        None => bail!("login already in progress"),
    }
    match client.actions().get_user_data().await {
        Some(Ok(_)) => {}
        Some(Err(err)) => tracing::warn!(error = %err, "Continuing without profile"),
        None => tracing::warn!("Profile request already in progress"),
    }

    let documents = client.documents_list();
    documents.mount();
    let settle = client.config().pagination.debounce_ms.max(1) * 2;
    let mut loaded_pages = 0;
    loop {
        match documents.state() {
            ListState::Exhausted => break,
            ListState::Fetching(_) => {
                tokio::time::sleep(Duration::from_millis(10)).await;
                continue;
            }
            ListState::Idle(_) if loaded_pages >= cli.max_pages => {
                tracing::warn!(pages = loaded_pages, "Stopping before the end of the list");
                break;
            }
            ListState::Idle(_) => {}
        }
        // Pretend the user reached the bottom of the list.
        documents.on_scroll(Viewport::new(1000.0, 1000.0, 0.0));
        tokio::time::sleep(Duration::from_millis(settle)).await;
        loaded_pages += 1;
    }
    documents.unmount();

    let state = client.store().get_state();
    let output = serde_json::json!({
        "state": &*state,
        "app": selectors::app_view(&state),
        "documents": selectors::documents_view(&state),
        "notifications": std::iter::from_fn(|| notifications.try_recv().ok()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    client.shutdown().await;
    Ok(())
}
