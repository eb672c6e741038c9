pub mod aggregator;
pub mod commands;
pub mod config;
pub mod error;
pub mod intelligence;
pub mod models;
pub mod note;
pub mod selection;
pub mod session;
pub mod ui;
pub mod wizard;

pub use commands::{dispatch, parse_action, NavTarget, UiAction};
pub use config::IntakeConfig;
pub use error::IntakeError;
pub use session::{AnalysisReport, IntakeSession};
pub use ui::{ChannelSink, RecordingSink, UiEvent, UiSink};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured filter. Safe to call more than once.
pub fn init_tracing(config: &IntakeConfig) {
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
