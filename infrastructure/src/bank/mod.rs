//! Question bank sources

mod toml_bank;

pub use toml_bank::{BankLoadError, load_bank, parse_bank};

use crate::config::FileBankConfig;
use blueprint_domain::QuestionBank;
use std::path::PathBuf;
use tracing::debug;

/// The bank named by `[bank] path`, or the built-in bank.
pub fn load_configured_bank(config: &FileBankConfig) -> Result<QuestionBank, BankLoadError> {
    match &config.path {
        Some(path) => load_bank(path),
        None => {
            debug!("Using built-in question bank");
            QuestionBank::standard().map_err(|source| BankLoadError::Invalid {
                path: PathBuf::from("<built-in>"),
                source,
            })
        }
    }
}
