//! CLI - Command Line Interface for podtui
//!
//! Every list/detail lookup the TUI does is scriptable. Output is
//! JSON-parseable with `--json` (the default when stdout is not a TTY).
//!
//! # Examples
//!
//! ```bash
//! # Browse the catalog
//! podtui list --search history --genre 3 --page 2
//!
//! # Inspect one show
//! podtui show 10716 --season 2 --json
//!
//! # Genres
//! podtui genres
//! podtui genre 4
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::genres;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Show, season or genre not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// podtui - terminal podcast browser
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "podtui",
    version,
    about = "Browse podcast shows, seasons and episodes from the terminal",
    long_about = "Search and filter the podcast catalog, page through shows, \
                  and drill into seasons and episodes.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  podtui                                Launch interactive TUI\n\
                  podtui --route \"/?search=crime\"       Open TUI on a filtered list\n\
                  podtui list -s history -g 3           Filter the catalog\n\
                  podtui show 10716 --json              Show details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL (overrides config and PODTUI_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Address to open the TUI at (e.g. "/shows/10716")
    #[arg(long)]
    pub route: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shows, filtered and paginated like the TUI list
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Show details, seasons and episodes for one show
    #[command(visible_alias = "s")]
    Show(ShowCmd),

    /// List the known genres
    Genres,

    /// Get a genre's description and show ids
    #[command(visible_alias = "g")]
    Genre(GenreCmd),
}

/// Filter and page through the catalog
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Case-insensitive text matched against title and description
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Genre id (1-9, see `podtui genres`)
    #[arg(long, short = 'g', value_parser = parse_genre)]
    pub genre: Option<u32>,

    /// 1-based page number
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Shows per page (defaults to config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,
}

/// Fetch one show
#[derive(Args, Debug)]
pub struct ShowCmd {
    /// Show id
    #[arg(required = true)]
    pub id: String,

    /// Season to list episodes for (defaults to the first)
    #[arg(long, short = 's')]
    pub season: Option<u32>,
}

/// Fetch one genre
#[derive(Args, Debug)]
pub struct GenreCmd {
    /// Genre id (1-9)
    #[arg(required = true, value_parser = parse_genre)]
    pub id: u32,
}

/// Accept only ids present in the genre table
pub fn parse_genre(s: &str) -> Result<u32, String> {
    let id: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a genre id", s))?;
    match genres::lookup(id) {
        Some(_) => Ok(id),
        None => Err(format!("unknown genre id {} (see `podtui genres`)", id)),
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print human-readable text, or the JSON wrapper around `data`
    pub fn print_or<T: Serialize>(&self, data: T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", text(&data));
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        tracing::debug!(code = i32::from(code), %msg, "command failed");
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_route_flag_stays_tui_mode() {
        let cli = Cli::parse_from(["podtui", "--route", "/shows/10716"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.route.as_deref(), Some("/shows/10716"));
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::parse_from(["podtui", "list", "-s", "crime", "-g", "2", "-p", "3"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::List(cmd)) = cli.command {
            assert_eq!(cmd.search.as_deref(), Some("crime"));
            assert_eq!(cmd.genre, Some(2));
            assert_eq!(cmd.page, 3);
            assert_eq!(cmd.page_size, None);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::parse_from(["podtui", "ls"]);
        if let Some(Command::List(cmd)) = cli.command {
            assert_eq!(cmd.page, 1);
            assert!(cmd.search.is_none());
            assert!(cmd.genre.is_none());
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_list_rejects_page_zero_and_bad_genre() {
        assert!(Cli::try_parse_from(["podtui", "list", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["podtui", "list", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["podtui", "list", "--genre", "42"]).is_err());
        assert!(Cli::try_parse_from(["podtui", "list", "--genre", "comedy"]).is_err());
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::parse_from(["podtui", "show", "10716", "--season", "2"]);
        if let Some(Command::Show(cmd)) = cli.command {
            assert_eq!(cmd.id, "10716");
            assert_eq!(cmd.season, Some(2));
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_genre_commands() {
        let cli = Cli::parse_from(["podtui", "genres"]);
        assert!(matches!(cli.command, Some(Command::Genres)));

        let cli = Cli::parse_from(["podtui", "genre", "4"]);
        if let Some(Command::Genre(cmd)) = cli.command {
            assert_eq!(cmd.id, 4);
        } else {
            panic!("Expected Genre command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "podtui",
            "--json",
            "--quiet",
            "--api-url",
            "http://localhost:4000",
            "genres",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["podtui", "show", "1", "-j", "-c", "/tmp/podtui.toml"]);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/podtui.toml")));
    }

    #[test]
    fn test_parse_genre() {
        assert_eq!(parse_genre("1"), Ok(1));
        assert_eq!(parse_genre("9"), Ok(9));
        assert!(parse_genre("0").is_err());
        assert!(parse_genre("10").is_err());
        assert!(parse_genre("x").is_err());
    }

    #[test]
    fn test_json_output_shape() {
        let ok = serde_json::to_value(JsonOutput::success(vec![1, 2])).unwrap();
        assert_eq!(ok, serde_json::json!({ "data": [1, 2] }));

        let err = serde_json::to_value(JsonOutput::<()>::error_msg("Show not found.", ExitCode::NotFound)).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "Show not found.", "exit_code": 4 }));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
    }
}
