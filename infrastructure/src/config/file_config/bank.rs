//! Question bank configuration from TOML (`[bank]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw bank configuration from TOML
///
/// ```toml
/// [bank]
/// path = "banks/advisor.toml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBankConfig {
    /// TOML bank file; the built-in bank is used when unset
    pub path: Option<PathBuf>,
}
