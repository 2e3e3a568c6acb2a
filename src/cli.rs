use crate::headers::Bot;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Parser, Debug, Clone)]
#[command(name = "preview-doctor")]
#[command(
    about = "Replays a social crawler fetch and diagnoses Open Graph / Twitter card previews",
    long_about = None
)]
pub struct Cli {
    /// The URL to inspect
    #[arg(value_name = "URL")]
    pub url: String,

    /// Crawler whose request headers are emulated
    #[arg(long, value_enum, default_value_t = Bot::Linkedin, alias = "user-agent")]
    pub bot: Bot,

    /// Emit the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Baseline file to compare against (or to write with --update-baseline)
    #[arg(long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Write the current final URL and metadata as the new baseline and exit
    #[arg(long)]
    pub update_baseline: bool,

    /// Maximum number of redirects to follow (default: 5)
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Per-request timeout in milliseconds (default: 15000)
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
