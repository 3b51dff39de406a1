use crate::cli::{Cli, ConfigAction};
use crate::commands::{config_store, mask_secret, CommandError, Result};
use crate::output::{format_output, OutputData};
use newshound_core::{EngineUpdate, SearchConfig};
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn run(cli: &Cli, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => {
            println!("{}", config_store(cli).path().display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(cli, force),
        ConfigAction::Set {
            engine,
            enable,
            disable,
            api_key,
            prompt,
            max,
            time_range,
            days,
        } => {
            let api_key = match (api_key, prompt) {
                (Some(key), _) => Some(key),
                (None, true) => Some(read_secret(&engine)?),
                (None, false) => None,
            };
            let store = config_store(cli);
            let mut config = store.load_or_default()?;
            let enabled = resolve_enabled(&config, &engine, enable, disable, api_key.is_some())?;

            let mut update = EngineUpdate::new(enabled);
            if let Some(key) = api_key {
                update = update.api_key(key);
            }
            if let Some(max) = max {
                update = update.max_articles(max);
            }
            if let Some(range) = time_range {
                update = update.time_range(range);
            }
            if let Some(days) = days {
                update = update
                    .time_range(newshound_core::TimeRange::Custom)
                    .custom_days(days);
            }
            config.set_engine_config(&engine, update);
            store.save(&config)?;

            println!(
                "{} {} updated ({})",
                "Success!".green().bold(),
                engine.cyan(),
                if enabled { "enabled" } else { "disabled" }
            );
            Ok(())
        }
    }
}

/// Explicit flags win; a new key enables the engine; otherwise keep the current state.
fn resolve_enabled(
    config: &SearchConfig,
    engine: &str,
    enable: bool,
    disable: bool,
    has_new_key: bool,
) -> Result<bool> {
    let Some(current) = config.engine(engine) else {
        return Err(CommandError::UnknownEngine(engine.to_string()));
    };
    Ok(match (enable, disable) {
        (true, _) => true,
        (_, true) => false,
        _ => current.enabled || has_new_key,
    })
}

fn show_config(cli: &Cli) -> Result<()> {
    let store = config_store(cli);
    let mut config = store.load_or_default()?;
    for name in config.available_engines() {
        let masked = config
            .engine(&name)
            .and_then(|e| e.api_key.as_deref())
            .map(mask_secret);
        if let Some(masked) = masked {
            let enabled = config.engine(&name).map(|e| e.enabled).unwrap_or(false);
            config.set_engine_config(&name, EngineUpdate::new(enabled).api_key(masked));
        }
    }

    let value = serde_json::json!({
        "path": store.path().display().to_string(),
        "exists": store.exists(),
        "config": serde_json::to_value(&config)?,
    });
    format_output(&OutputData::ConfigInfo(value), cli.output)?;
    Ok(())
}

fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let store = config_store(cli);
    if store.exists() && !force {
        return Err(CommandError::InvalidConfig(format!(
            "{} already exists (use --force to overwrite)",
            store.path().display()
        )));
    }
    store.save(&SearchConfig::default())?;
    println!(
        "{} wrote {}",
        "Success!".green().bold(),
        store.path().display().to_string().cyan()
    );
    Ok(())
}

fn read_secret(engine: &str) -> Result<String> {
    eprint!("API key for {}: ", engine);
    io::stderr().flush()?;
    // Use rpassword for hidden input
    let key = match rpassword::read_password() {
        Ok(password) => password.trim().to_string(),
        Err(_) => {
            // Fallback to regular input if rpassword fails (e.g., in non-TTY)
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        }
    };
    if key.is_empty() {
        return Err(CommandError::InvalidInput("empty API key".into()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_state_resolution() {
        let config = SearchConfig::default();
        assert!(!resolve_enabled(&config, "tavily", false, false, false).unwrap());
        assert!(resolve_enabled(&config, "tavily", false, false, true).unwrap());
        assert!(!resolve_enabled(&config, "hackernews", false, true, false).unwrap());
        assert!(resolve_enabled(&config, "hackernews", false, false, false).unwrap());
        assert!(resolve_enabled(&config, "gopher", true, false, false).is_err());
    }
}
