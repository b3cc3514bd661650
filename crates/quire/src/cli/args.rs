//! Clap argument definitions for the `quire` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use quire_query::QueryMode;

/// Parse a compilation mode from a string.
fn parse_mode(s: &str) -> Result<QueryMode, String> {
    s.parse::<QueryMode>().map_err(|e| match e.suggestion() {
        Some(hint) => format!("{e}. {hint}"),
        None => e.to_string(),
    })
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Compile search filters to queries and annotate search results")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); QUIRE_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `quire compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    /// Filter JSON file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Compilation mode: simple, advanced or raw [default: from config]
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<QueryMode>,

    /// Keep entries in typed order instead of grouping by operator
    /// (`--custom-grouping=false` overrides a config that enables it)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub custom_grouping: Option<bool>,

    /// Hand-written query used as-is (implies --mode raw)
    #[arg(long)]
    pub raw: Option<String>,

    /// First day of the date range (YYYY-MM-DD)
    #[arg(long, requires = "max_date")]
    pub min_date: Option<String>,

    /// Last day of the date range (YYYY-MM-DD)
    #[arg(long, requires = "min_date")]
    pub max_date: Option<String>,

    /// Print the percent-encoded form sent to the backend
    #[arg(long, conflicts_with = "json")]
    pub encoded: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print the compiled clause tree
    #[arg(long, conflicts_with_all = ["json", "encoded"])]
    pub explain: bool,
}

/// Arguments for `quire annotate`.
#[derive(Args, Debug, Clone)]
pub struct AnnotateCommand {
    /// Cells JSON file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Do not color named entities
    #[arg(long)]
    pub no_entities: bool,

    /// Condense each cell to context windows around the terms
    #[arg(long)]
    pub concordance: bool,

    /// Extra term to highlight in every cell (repeatable)
    #[arg(short = 't', long = "term")]
    pub terms: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `quire concordance`.
#[derive(Args, Debug, Clone)]
pub struct ConcordanceCommand {
    /// Text file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Term to search for (repeatable)
    #[arg(short = 't', long = "term", required = true)]
    pub terms: Vec<String>,

    /// Characters of context on each side of a match [default: from config]
    #[arg(short = 'c', long)]
    pub context: Option<usize>,
}

/// Arguments for `quire init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `quire` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter map into a query string
    #[command(after_help = "\
INPUT:
  A JSON object mapping field names to ordered entries:

  {
    \"title\":  [{\"value\": \"treaty\", \"operator\": \"AND\"}],
    \"author\": [{\"value\": \"Kant\"}, {\"value\": \"Hume\", \"operator\": \"OR\"}],
    \"body\":   [{\"value\": \"draft\", \"negated\": true}]
  }

  The reserved keys min_date and max_date supply a date range.

EXAMPLES:
  quire compile filters.json
  quire compile --mode simple < filters.json
  quire compile --encoded --min-date 2020-01-01 --max-date 2020-12-31 filters.json
  quire compile --raw 'title:\"treaty\" OR body:\"peace\"'")]
    Compile(CompileCommand),

    /// Annotate result cells with entities and highlights
    #[command(after_help = "\
INPUT:
  A JSON array of cells:

  [{\"id\": \"doc-1\", \"field\": \"body\", \"text\": \"Kant wrote...\",
    \"ner\": {\"starts\": [0], \"ends\": [4], \"labels\": [[\"PER\"]], \"confidences\": [0.99]},
    \"terms\": [\"peace\"],
    \"filters\": {\"body\": [{\"value\": \"treaty\"}]}}]

  ner, terms and filters are optional. Terms from filters are highlighted too.")]
    Annotate(AnnotateCommand),

    /// Condense text to context windows around terms
    Concordance(ConcordanceCommand),

    /// Show entity labels and their colors
    Labels,

    /// Show effective configuration settings
    Config,

    /// Initialize quire configuration in current directory
    Init(InitCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_parses_case_insensitively() {
        let cli = Cli::try_parse_from(["quire", "compile", "--mode", "Simple"]).unwrap();
        let Commands::Compile(cmd) = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(cmd.mode, Some(QueryMode::Simple));
    }

    /// Parses a compile command line.
    fn compile_args(args: &[&str]) -> CompileCommand {
        let cli = Cli::try_parse_from(["quire", "compile"].iter().chain(args)).unwrap();
        let Commands::Compile(cmd) = cli.command else {
            panic!("expected compile");
        };
        cmd
    }

    #[test]
    fn custom_grouping_is_an_override() {
        assert_eq!(compile_args(&[]).custom_grouping, None);
        assert_eq!(compile_args(&["--custom-grouping"]).custom_grouping, Some(true));
        assert_eq!(
            compile_args(&["--custom-grouping=false"]).custom_grouping,
            Some(false)
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["quire", "compile", "--mode", "fuzzy"]).is_err());
    }

    #[test]
    fn date_bounds_come_in_pairs() {
        assert!(Cli::try_parse_from(["quire", "compile", "--min-date", "2020-01-01"]).is_err());
    }

    #[test]
    fn concordance_requires_a_term() {
        assert!(Cli::try_parse_from(["quire", "concordance"]).is_err());
    }
}
