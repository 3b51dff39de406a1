use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newshound")]
#[command(about = "Newshound - collect AI news from many sources at once")]
#[command(version)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  newshound collect \"AI agents\"                 Search every enabled engine
  newshound collect \"LLM\" -s hackernews,arxiv   Search selected engines
  newshound collect \"robotics\" --time-range 30d Look back a month
  newshound sources                             Show engines and their state

\x1b[1;36mConfiguration:\x1b[0m
  newshound config init                         Write a starter config file
  newshound config set tavily --prompt          Store an API key
  newshound validate                            Check the configuration

\x1b[1;36mEnvironment:\x1b[0m
  NEWS_API_KEY, TAVILY_API_KEY, GOOGLE_SEARCH_API_KEY, GOOGLE_SEARCH_ENGINE_ID,
  BING_SEARCH_API_KEY, SERPER_API_KEY, BRAVE_SEARCH_API_KEY, METASOSEARCH_API_KEY")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "NEWSHOUND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore API keys from the environment
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Copy output to clipboard
    #[arg(short, long, global = true)]
    pub copy: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search all enabled engines and print deduplicated articles
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  newshound collect \"multimodal models\"
  newshound collect \"chips\" --sources duckduckgo,rss_feeds --max 5
  newshound collect \"agents\" --days 3 --threshold 0.9 --output json")]
    Collect(CollectArgs),

    /// List engines with their enabled state and time window
    #[command(alias = "ls")]
    Sources,

    /// Validate the effective configuration
    Validate,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone, Debug)]
pub struct CollectArgs {
    /// Search query
    pub query: String,

    /// Comma-separated engines to search (default: every enabled engine)
    #[arg(short, long, value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Preset window applied to every engine (1d, 7d, 30d, 365d)
    #[arg(short = 'r', long)]
    pub time_range: Option<newshound_core::TimeRange>,

    /// Custom window in days, overrides --time-range
    #[arg(short, long)]
    pub days: Option<i64>,

    /// Maximum articles kept per engine
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Title similarity above which articles count as duplicates
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Give up on an engine after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Drop placeholder results from the output
    #[arg(long)]
    pub hide_placeholders: bool,

    /// Do not show the progress spinner
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration (keys masked)
    Show,

    /// Print the config file location
    Path,

    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Update one engine in the config file
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  newshound config set tavily --api-key tvly-xxx
  newshound config set serper --prompt
  newshound config set arxiv --disable
  newshound config set hackernews --time-range 30d --max 20")]
    Set {
        /// Engine identifier (e.g. tavily, hackernews)
        engine: String,

        /// Enable the engine
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Disable the engine
        #[arg(long)]
        disable: bool,

        /// API key to store
        #[arg(long, conflicts_with = "prompt")]
        api_key: Option<String>,

        /// Read the API key from a hidden prompt
        #[arg(long)]
        prompt: bool,

        /// Maximum articles for this engine
        #[arg(long)]
        max: Option<usize>,

        /// Preset window for this engine
        #[arg(long)]
        time_range: Option<newshound_core::TimeRange>,

        /// Custom window in days for this engine
        #[arg(long)]
        days: Option<i64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly output
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}
