//! Flow configuration from TOML (`[flow]` section)

use serde::{Deserialize, Serialize};

/// Raw flow configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFlowConfig {
    /// Show the payment gate screen before lead capture
    pub require_gate: bool,
}

impl Default for FileFlowConfig {
    fn default() -> Self {
        Self { require_gate: true }
    }
}
