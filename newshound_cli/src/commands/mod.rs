pub mod collect;
pub mod config;
pub mod sources;
pub mod validate;

use crate::cli::Cli;
use newshound_core::config::{ConfigStore, ConfigStoreError};
use newshound_core::SearchConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown engine '{0}'")]
    UnknownEngine(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config store error: {0}")]
    Store(#[from] ConfigStoreError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

pub fn config_store(cli: &Cli) -> ConfigStore {
    match &cli.config {
        Some(path) => ConfigStore::new(path.clone()),
        None => ConfigStore::new_default(),
    }
}

/// Stored config (or defaults) with environment credentials layered on top.
pub fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let store = config_store(cli);
    let mut config = store.load_or_default()?;
    if !cli.no_env {
        crate::env::apply_process_env(&mut config);
    }
    Ok(config)
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CommandError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CommandError::Clipboard(e.to_string()))?;
    eprintln!("Copied to clipboard");
    Ok(())
}

/// Mask all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
