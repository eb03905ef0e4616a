//! Disaster-recovery scenario dashboard.
//!
//! This crate provides:
//! - The DR scenario catalog model and its JSON loader
//! - Mapping from scenario titles to recovery-process runbook filenames
//! - An axum router serving the UI, the catalog snapshot and the runbooks
//! - Process configuration (CLI flags, environment, base directory detection)

pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod server;
pub mod store;

pub use config::{Args, Config, Environment};
pub use error::StoreError;
pub use models::{DisasterScenario, DiscardedScenario};
pub use server::{build_router, AppState};
pub use store::ScenarioStore;
