//! Opening hours engine for service channel versions
//!
//! Models how a service channel is available over time (recurring weekly
//! hours, date-bounded exceptional closures and openings, one-off special
//! windows, holiday hours) and converts between the persisted relational
//! shape and the hierarchical view model, with full create/update/delete
//! reconciliation on every save.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the embedding application
pub fn init_tracing(config: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("aukiolo={}", config.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
