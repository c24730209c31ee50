//! `jobwatch`: one scheduled pass over the listings API.
//!
//! Reads credentials from the environment (or `./.env`), logs to the terminal
//! and `./jobwatch.log`, and exits non-zero only when configuration is
//! missing or a notification could not be delivered.

use std::process::ExitCode;

use anyhow::{Context, Result};
use jobwatch_engine::{run, ReqwestListingSource, RunSummary, TelegramNotifier, WatchConfig};
use jobwatch_logging::{initialize, watch_error, LogDestination};

fn main() -> ExitCode {
    // A missing .env file is normal; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let config = match WatchConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("jobwatch: {err}");
            return ExitCode::FAILURE;
        }
    };
    initialize(LogDestination::default_both(), config.verbose);

    match execute(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            watch_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &WatchConfig) -> Result<RunSummary> {
    let source = ReqwestListingSource::new(config.listings_endpoint.clone(), config.fetch.clone())
        .context("building listings client")?;
    let notifier = TelegramNotifier::new(
        config.telegram_api_base.clone(),
        config.bot_token.clone(),
        config.fetch.request_timeout,
    )
    .context("building messaging client")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    let summary = runtime
        .block_on(run(config, &source, &notifier))
        .context("run aborted")?;
    Ok(summary)
}
