//! CLI command definitions and handlers

mod analyze;
mod export;
mod record;
mod summarize;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{load_project_config, ProjectConfig};

/// swiftuice - SwiftUI performance analysis for AI agents
#[derive(Parser, Debug)]
#[command(name = "swiftuice")]
#[command(
    version,
    about = "SwiftUI cause-and-effect trace analysis for AI agents",
    long_about = "swiftuice records and exports Instruments traces, builds the SwiftUI \
cause-and-effect graph (trigger -> state change -> view update) and detects rendering \
anti-patterns with suggested fixes.\n\n\
The 'analyze' command produces structured JSON designed for AI agents: issue detection, \
fix suggestions, source correlation and agent instructions.",
    after_help = "\
Examples:
  swiftuice record --app com.example.App --time 10s   Record a SwiftUI trace
  swiftuice export --trace swiftui.trace              Export to parseable files
  swiftuice summarize --in exported                   Markdown summary + Graphviz
  swiftuice analyze --in swiftui.trace --source .     JSON report for agents"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Path to a swiftuice.toml (default: source root, then current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record an Instruments trace by launching the app
    Record {
        /// App bundle id (preferred) or full path to .app
        #[arg(long)]
        app: String,

        /// Instruments template name
        #[arg(long, default_value = "SwiftUI")]
        template: String,

        /// Device name or UDID (default: whatever xctrace picks)
        #[arg(long)]
        device: Option<String>,

        /// Time limit, e.g. 10s or 1m
        #[arg(long = "time", default_value = "10s")]
        time_limit: String,

        /// Output .trace path
        #[arg(long, default_value = "swiftui.trace")]
        out: PathBuf,
    },

    /// Export a .trace to parseable formats
    Export {
        /// Input .trace path
        #[arg(long)]
        trace: PathBuf,

        /// Output directory
        #[arg(long, default_value = "exported")]
        out: PathBuf,

        /// Export format: auto, xml, json, csv (default: from config, else auto)
        #[arg(long, value_parser = ["auto", "xml", "json", "csv"])]
        format: Option<String>,
    },

    /// Generate a human-readable summary and a Graphviz graph
    Summarize {
        /// Input directory (from export) or a .trace path
        #[arg(long = "in")]
        input: PathBuf,

        /// Markdown summary output
        #[arg(long, default_value = "summary.md")]
        out: PathBuf,

        /// Graphviz .dot output
        #[arg(long, default_value = "graph.dot")]
        dot: PathBuf,
    },

    /// Generate the JSON report for AI agents
    #[command(after_help = "\
Examples:
  swiftuice analyze --in exported                        Write analysis.json
  swiftuice analyze --in run.trace --source ./MyApp      Correlate with Swift sources
  swiftuice analyze --in exported --stdout --compact     Single-line JSON to stdout
  swiftuice analyze --in exported --rerender-threshold 20

Exit codes: 0 success, 1 failure, 2 usage error, 3 no parseable data")]
    Analyze {
        /// Input directory (from export) or a .trace path
        #[arg(long = "in")]
        input: PathBuf,

        /// Swift source root for code correlation
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output JSON file path
        #[arg(long, default_value = "analysis.json")]
        out: PathBuf,

        /// Output compact JSON (for piping)
        #[arg(long)]
        compact: bool,

        /// Write the report to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Flag views updated at least this many times
        #[arg(long)]
        rerender_threshold: Option<u64>,

        /// Flag chains longer than this many nodes
        #[arg(long)]
        depth_limit: Option<usize>,

        /// Flag causes firing at least this many times
        #[arg(long)]
        trigger_threshold: Option<u64>,
    },

    /// Show version
    Version,
}

fn project_config(cli_config: Option<&PathBuf>, source_root: Option<&PathBuf>) -> ProjectConfig {
    load_project_config(cli_config.map(PathBuf::as_path), source_root.map(PathBuf::as_path))
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Record {
            app,
            template,
            device,
            time_limit,
            out,
        } => record::run(record::RecordArgs {
            app,
            template,
            device,
            time_limit,
            out,
        }),

        Commands::Export { trace, out, format } => {
            let config = project_config(cli.config.as_ref(), None);
            export::run(&trace, &out, format.as_deref(), &config)
        }

        Commands::Summarize { input, out, dot } => {
            let config = project_config(cli.config.as_ref(), None);
            summarize::run(&input, &out, &dot, &config)
        }

        Commands::Analyze {
            input,
            source,
            out,
            compact,
            stdout,
            rerender_threshold,
            depth_limit,
            trigger_threshold,
        } => {
            let mut config = project_config(cli.config.as_ref(), source.as_ref());
            // CLI flags override config values
            if let Some(n) = rerender_threshold {
                config.thresholds.excessive_rerender_count = n;
            }
            if let Some(n) = depth_limit {
                config.thresholds.cascade_depth_limit = n;
            }
            if let Some(n) = trigger_threshold {
                config.thresholds.frequent_trigger_count = n;
            }
            analyze::run(analyze::AnalyzeArgs {
                input,
                source,
                out,
                compact,
                stdout,
                config,
            })
        }

        Commands::Version => {
            println!("swiftuice v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from([
            "swiftuice",
            "analyze",
            "--in",
            "exported",
            "--stdout",
            "--compact",
            "--depth-limit",
            "6",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Analyze {
                input,
                out,
                stdout,
                compact,
                depth_limit,
                rerender_threshold,
                ..
            } => {
                assert_eq!(input, PathBuf::from("exported"));
                assert_eq!(out, PathBuf::from("analysis.json"));
                assert!(stdout && compact);
                assert_eq!(depth_limit, Some(6));
                assert_eq!(rerender_threshold, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_record_defaults() {
        let cli = Cli::try_parse_from(["swiftuice", "record", "--app", "com.example.App"]).unwrap();
        match cli.command {
            Commands::Record {
                template,
                time_limit,
                out,
                device,
                ..
            } => {
                assert_eq!(template, "SwiftUI");
                assert_eq!(time_limit, "10s");
                assert_eq!(out, PathBuf::from("swiftui.trace"));
                assert!(device.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["swiftuice", "record"]).is_err());
        assert!(Cli::try_parse_from(["swiftuice", "export"]).is_err());
        assert!(Cli::try_parse_from(["swiftuice", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["swiftuice", "export", "--trace", "a.trace", "--format", "yaml"]).is_err());
        assert!(Cli::try_parse_from(["swiftuice"]).is_err());
    }
}
