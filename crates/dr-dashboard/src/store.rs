//! Read-only scenario catalog.
//!
//! Loaded once before the listener starts and shared behind an `Arc`; there
//! is no writer after construction.

use std::path::Path;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::{DisasterScenario, DiscardedScenario, ScenarioCatalog};
use crate::resolver;

/// In-memory snapshot of the DR catalog, in source order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioStore {
    scenarios: Vec<DisasterScenario>,
    discarded: Vec<DiscardedScenario>,
}

impl ScenarioStore {
    /// Load the catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            scenarios = store.scenarios.len(),
            discarded = store.discarded.len(),
            "Loaded disaster scenario catalog"
        );

        Ok(store)
    }

    /// Parse a catalog from a JSON string and resolve runbook filenames.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let catalog: ScenarioCatalog = serde_json::from_str(raw)?;
        Ok(Self::new(catalog.scenarios, catalog.discarded_scenarios))
    }

    /// Build a store from parsed records. Any runbook filename already on a
    /// record is replaced by the resolved one.
    pub fn new(mut scenarios: Vec<DisasterScenario>, discarded: Vec<DiscardedScenario>) -> Self {
        for scenario in &mut scenarios {
            scenario.recovery_process_file = resolver::resolve(&scenario.scenario);
            debug!(
                scenario = %scenario.scenario,
                file = %scenario.recovery_process_file,
                "Resolved recovery process file"
            );
        }

        Self {
            scenarios,
            discarded,
        }
    }

    pub fn scenarios(&self) -> &[DisasterScenario] {
        &self.scenarios
    }

    pub fn discarded(&self) -> &[DiscardedScenario] {
        &self.discarded
    }

    /// Number of active (non-discarded) scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenarios whose runbook does not exist under `dir`.
    pub fn missing_documents(&self, dir: &Path) -> Vec<&DisasterScenario> {
        self.scenarios
            .iter()
            .filter(|s| !dir.join(&s.recovery_process_file).is_file())
            .collect()
    }
}
