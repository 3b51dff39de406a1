use crate::cli::OutputFormat;
use crate::commands::Result;
use newshound_core::{EngineInfo, SearchResult, ValidationReport};
use serde::Serialize;
use serde_json::Value;

pub mod pretty;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OutputData {
    Collection(SearchResult),
    Sources(Vec<EngineInfo>),
    Validation(ValidationReport),
    ConfigInfo(Value),
    Message(String),
}

/// Render `data` in the requested format and return the text that was printed.
pub fn render(data: &OutputData, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Pretty => match data {
            OutputData::Collection(result) => pretty::format_collection(result),
            OutputData::Sources(engines) => pretty::format_sources(engines),
            OutputData::Validation(report) => pretty::format_validation(report),
            OutputData::ConfigInfo(value) => serde_yaml::to_string(value)?,
            OutputData::Message(message) => message.clone(),
        },
    };
    Ok(text)
}

pub fn format_output(data: &OutputData, format: OutputFormat) -> Result<String> {
    let text = render(data, format)?;
    println!("{}", text.trim_end());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_is_tagged() {
        let text = render(&OutputData::Message("hi".into()), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "Message");
        assert_eq!(value["data"], "hi");
    }

    #[test]
    fn empty_collection_renders_in_every_format() {
        let data = OutputData::Collection(SearchResult::empty("agents"));
        for format in [OutputFormat::Pretty, OutputFormat::Json, OutputFormat::Yaml] {
            assert!(render(&data, format).unwrap().contains("agents"));
        }
    }
}
