//! Todolists demo client.
//!
//! Checks for a session, logs in with the configured credentials when needed,
//! fetches the todolists and prints them.
//!
//! Run with `--offline` to use the in-memory backend instead of the network.

use anyhow::{bail, Context};
use todolists::{
    actions::{Command, RootAction},
    api::{AuthApi, HttpApi, TodolistsApi},
    config::Config,
    new_store, TodolistsStore,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| "todolists=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    config.validate().context("invalid configuration")?;
    info!(api_url = %config.backend.url, "Configuration loaded");

    if std::env::args().any(|arg| arg == "--offline") {
        return run_offline(&config).await;
    }

    let api = HttpApi::new(&config.api_config()).context("failed to build API client")?;
    run(api, &config).await
}

#[cfg(feature = "test-utils")]
async fn run_offline(config: &Config) -> anyhow::Result<()> {
    use todolists::api::MockApi;
    use todolists::state::Todolist;

    info!("Using the in-memory backend");
    let mut api = MockApi::new().with_todolists(vec![
        Todolist::new("1", "What to learn"),
        Todolist::new("2", "What to buy"),
    ]);
    if let Some(params) = config.login_params() {
        api = api.with_credentials(params.email, params.password);
    }
    run(api, config).await
}

#[cfg(not(feature = "test-utils"))]
async fn run_offline(_config: &Config) -> anyhow::Result<()> {
    bail!("--offline needs the `test-utils` feature")
}

async fn run<Api>(api: Api, config: &Config) -> anyhow::Result<()>
where
    Api: AuthApi + TodolistsApi + Clone + 'static,
{
    let store = new_store(api, config.store_config());

    dispatch(&store, Command::InitializeApp).await?;

    if !store.state(|s| s.auth.is_logged_in).await {
        match config.login_params() {
            Some(params) => dispatch(&store, Command::Login { params }).await?,
            None => warn!("No session and no TODOLISTS_EMAIL/TODOLISTS_PASSWORD configured"),
        }
    }

    let logged_in = store.state(|s| s.auth.is_logged_in).await;
    if logged_in {
        dispatch(&store, Command::FetchTodolists).await?;

        let lines: Vec<String> = store
            .state(|s| {
                s.todolists
                    .iter()
                    .map(|tl| format!("{}  {}", tl.id(), tl.title()))
                    .collect()
            })
            .await;
        info!(count = lines.len(), "Todolists loaded");
        for line in lines {
            println!("{line}");
        }
    }

    let (status, error) = store.state(|s| (s.app.status, s.app.error.clone())).await;
    info!(?status, pending_effects = store.pending_effects(), "Shutting down");

    store
        .shutdown(config.store_config().default_shutdown_timeout)
        .await
        .context("shutdown did not complete")?;

    match (logged_in, error) {
        (_, Some(error)) => bail!("backend reported: {error}"),
        (false, None) => bail!("not logged in"),
        (true, None) => Ok(()),
    }
}

async fn dispatch<Api>(store: &TodolistsStore<Api>, command: Command) -> anyhow::Result<()>
where
    Api: AuthApi + TodolistsApi + Clone + 'static,
{
    let mut handle = store.send(RootAction::from(command)).await?;
    handle.wait().await;
    Ok(())
}
