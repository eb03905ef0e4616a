//! Data model for the disaster-recovery catalog.
//!
//! The testing framework writes the catalog with snake_case keys; the API
//! emits camelCase. Aliases let deserialization accept both.

use serde::{Deserialize, Serialize};

/// A failure mode with an associated recovery runbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterScenario {
    /// Human-readable title, used as the natural key.
    pub scenario: String,

    #[serde(default, alias = "primary_recovery_method")]
    pub primary_recovery_method: String,

    #[serde(default, alias = "alternate_fallback")]
    pub alternate_fallback: String,

    #[serde(default, alias = "detection_signals")]
    pub detection_signals: String,

    #[serde(default, alias = "rto_target")]
    pub rto_target: String,

    #[serde(default, alias = "rpo_target")]
    pub rpo_target: String,

    #[serde(default, alias = "mttr_expected")]
    pub mttr_expected: String,

    #[serde(default, alias = "expected_data_loss")]
    pub expected_data_loss: String,

    #[serde(default)]
    pub likelihood: String,

    #[serde(default, alias = "business_impact")]
    pub business_impact: String,

    #[serde(default, alias = "affected_components")]
    pub affected_components: String,

    #[serde(default, alias = "notes_assumptions")]
    pub notes_assumptions: String,

    /// Whether an automated test covers this scenario.
    #[serde(default, alias = "test_enabled")]
    pub test_enabled: bool,

    #[serde(default, alias = "test_description")]
    pub test_description: String,

    /// Path of the test file, `None` when no test exists.
    #[serde(default, alias = "test_file")]
    pub test_file: Option<String>,

    /// Runbook filename, assigned by the store at load time.
    #[serde(default, alias = "recovery_process_file")]
    pub recovery_process_file: String,
}

/// A failure mode that was considered and rejected. Has no runbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedScenario {
    pub scenario: String,
    #[serde(default)]
    pub reason: String,
}

/// On-disk layout of the scenario catalog.
#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioCatalog {
    pub scenarios: Vec<DisasterScenario>,
    #[serde(alias = "discardedScenarios")]
    pub discarded_scenarios: Vec<DiscardedScenario>,
}
