//! DR dashboard binary.
//!
//! Loads the disaster scenario catalog once and serves it over HTTP together
//! with the recovery-process runbooks.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dr_dashboard::{server, AppState, Args, Config, ScenarioStore};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json)?;

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::resolve(&args, &cwd);

    info!(
        environment = %config.environment,
        base_dir = %config.base_dir.display(),
        "Starting DR dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = match ScenarioStore::load(&config.data_file) {
        Ok(store) => store,
        Err(e) => {
            error!("Cannot start without scenario data: {e}");
            return Err(e.into());
        }
    };

    let missing = store.missing_documents(&config.recovery_dir);
    for scenario in &missing {
        warn!(
            scenario = %scenario.scenario,
            file = %scenario.recovery_process_file,
            "Recovery process document not found"
        );
    }
    if !missing.is_empty() {
        warn!(
            count = missing.len(),
            dir = %config.recovery_dir.display(),
            "Some scenarios have no recovery process document"
        );
    }

    server::run_server(AppState::new(store, config))
        .await
        .context("Server error")
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new("dr_dashboard=info,tower_http=info")
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
    Ok(())
}
