//! Jobwatch engine: page fetching, notification dispatch, seen-set persistence
//! and the sequential run that ties them together.
mod agent;
mod config;
mod fetch;
mod notify;
mod persist;
mod process;
mod run;
mod types;

pub use agent::{random_user_agent, USER_AGENTS};
pub use config::{
    default_state_path, ConfigError, WatchConfig, LISTINGS_ENDPOINT, SITE_BASE, STATE_FILENAME,
    TELEGRAM_API_BASE,
};
pub use fetch::{page_url, FetchSettings, ListingSource, ReqwestListingSource};
pub use notify::{DispatchAck, Notifier, TelegramNotifier};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, SeenGuard, SeenStore};
pub use process::{Flow, Processor};
pub use run::{run, RunSummary};
pub use types::{DispatchError, FailureKind, FetchError, RunError};
