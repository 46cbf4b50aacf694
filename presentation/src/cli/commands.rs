//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Text,
    /// JSON envelopes exactly as the model would receive them
    Json,
}

/// Sensitivity filter for `tools`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelFilter {
    Read,
    Write,
    Destructive,
}

/// How `ask` policies are answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ApprovalMode {
    /// Prompt on the terminal
    #[default]
    Prompt,
    /// Approve every request
    Approve,
    /// Deny every request
    Deny,
    /// No approval channel: `ask` fails closed
    None,
}

/// CLI arguments for scholar-agent
#[derive(Parser, Debug)]
#[command(name = "scholar-agent")]
#[command(author, version, about = "Tool-call bridge for a research assistant")]
#[command(long_about = r#"
scholar-agent exposes a research library (items, collections, notes, PDFs)
plus web and academic search as tools a language model can call.

Configuration files are loaded from (in priority order):
1. SCHOLAR_* environment variables (e.g. SCHOLAR_AGENT__LIBRARY=L1)
2. --config <path>     Explicit config file
3. ./scholar.toml      Project-level config
4. ~/.config/scholar-agent/config.toml   Global config

Example:
  scholar-agent tools --json
  scholar-agent run calls.json --library library.json --approval deny
  echo '[{"name":"search_library","arguments":{"query":"engine"}}]' | scholar-agent run -
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tool catalog
    Tools(ToolsArgs),
    /// Execute a batch of tool calls read from a JSON file
    Run(RunArgs),
    /// Validate the loaded configuration
    Check,
}

#[derive(Args, Debug, Default)]
pub struct ToolsArgs {
    /// Print the JSON Schema sent to the model
    #[arg(long)]
    pub json: bool,

    /// Include deprecated single-verb tools
    #[arg(long)]
    pub include_deprecated: bool,

    /// Only tools at this sensitivity level
    #[arg(long, value_enum)]
    pub level: Option<LevelFilter>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON file with tool calls, or `-` for stdin
    #[arg(value_name = "CALLS")]
    pub calls: PathBuf,

    /// Library snapshot (JSON) to run against
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Write the library back to the snapshot file afterwards
    #[arg(long, requires = "library")]
    pub save: bool,

    /// Restrict the session to one library id (overrides agent.library)
    #[arg(long, value_name = "LIBRARY_ID")]
    pub scope: Option<String>,

    /// How to answer `ask` permission policies
    #[arg(long, value_enum, default_value = "prompt")]
    pub approval: ApprovalMode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "scholar-agent",
            "-vv",
            "run",
            "calls.json",
            "--library",
            "lib.json",
            "--save",
            "--approval",
            "deny",
            "-o",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.calls, PathBuf::from("calls.json"));
        assert!(args.save);
        assert_eq!(args.approval, ApprovalMode::Deny);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn test_save_requires_library() {
        assert!(Cli::try_parse_from(["scholar-agent", "run", "calls.json", "--save"]).is_err());
    }

    #[test]
    fn test_parse_tools() {
        let cli = Cli::parse_from(["scholar-agent", "tools", "--json", "--level", "destructive"]);
        let Some(Command::Tools(args)) = cli.command else {
            panic!("expected tools");
        };
        assert!(args.json);
        assert_eq!(args.level, Some(LevelFilter::Destructive));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
