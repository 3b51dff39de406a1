use crate::cli::Cli;
use crate::commands::{load_config, CommandError, Result};
use crate::output::{format_output, OutputData};

/// Print the validation report; an invalid config is a command failure.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let report = config.validate();
    let valid = report.valid;
    format_output(&OutputData::Validation(report), cli.output)?;
    if !valid {
        return Err(CommandError::InvalidConfig(
            "configuration has errors".to_string(),
        ));
    }
    Ok(())
}
