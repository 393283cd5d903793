use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::parse_limit;
use crate::output::OutputFormat;
use crate::parsers::browser::{Browser, BrowserSelector};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserArg {
    Auto,
    Chrome,
    Edge,
    Firefox,
}

impl From<BrowserArg> for BrowserSelector {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Auto => BrowserSelector::Auto,
            BrowserArg::Chrome => BrowserSelector::Only(Browser::Chrome),
            BrowserArg::Edge => BrowserSelector::Only(Browser::Edge),
            BrowserArg::Firefox => BrowserSelector::Only(Browser::Firefox),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Jsonl,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliOptions {
    /// Optional path to config file (YAML)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the history stores found in default locations
    Paths,
    /// Print the most recent visits
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Browser to read; auto tries every known browser in turn
    #[arg(short, long, value_enum, default_value_t = BrowserArg::Auto)]
    pub browser: BrowserArg,

    /// Explicit history database to read instead of the default locations
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Maximum number of records (defaults to the configured limit)
    #[arg(short, long, value_parser = parse_limit)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
