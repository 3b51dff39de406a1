use crate::cli::Cli;
use crate::commands::{copy_to_clipboard, load_config, Result};
use crate::output::{format_output, OutputData};
use newshound_core::sources::compiled_sources;
use newshound_core::Collector;

pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let collector = Collector::new(config);
    let engines = collector.engine_info();

    let text = format_output(&OutputData::Sources(engines), cli.output)?;
    if cli.output == crate::cli::OutputFormat::Pretty {
        println!("Compiled in: {}", compiled_sources().join(", "));
    }
    if cli.copy {
        copy_to_clipboard(&text)?;
    }
    Ok(())
}
