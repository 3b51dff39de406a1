//! Credentials from the process environment.

use newshound_core::config::{CREDENTIAL_ENV_VARS, GOOGLE_ENGINE_ID_ENV_VAR};
use newshound_core::SearchConfig;

/// Apply API keys found through `lookup` and return the engines they enabled.
///
/// Keys already stored in the config file are overridden by the environment.
pub fn apply_with<F>(config: &mut SearchConfig, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(engine_id) = lookup(GOOGLE_ENGINE_ID_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.google_search_engine_id = Some(engine_id);
    }

    let credentials: Vec<(&str, String)> = CREDENTIAL_ENV_VARS
        .iter()
        .filter_map(|&(engine, var)| lookup(var).map(|key| (engine, key)))
        .collect();
    let enabled = config.apply_credentials(credentials);
    for engine in &enabled {
        tracing::debug!(engine = %engine, "API key taken from environment");
    }
    enabled
}

pub fn apply_process_env(config: &mut SearchConfig) -> Vec<String> {
    apply_with(config, |var| std::env::var(var).ok())
}
