//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::display::align::RenderOptions;
use crate::display::wrap::WrapConfig;

/// wm - search and display waymark annotations.
#[derive(Parser, Debug)]
#[command(name = "wm")]
#[command(
    author,
    version,
    about,
    long_about = r##"wm filters waymark records with a small query language and prints them
column-aligned for the terminal.

Waymarks are structured comments of the form `type ::: content`, for example:
    // todo ::: fix bug #perf @agent owner:@alice

Records are read as JSON Lines from --records (or stdin), one parsed waymark
per line.

Output formats:
- text: aligned, terminal-width-aware lines grouped by file (default)
- jsonl: one JSON record per line
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    wm find todo @agent --records waymarks.jsonl
    wm find "#perf" !fix owner: --compact
    wm query todo @agent "#perf:hotpath" !fix
    wm tokens "fix bug #perf owner:@alice"
"##
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Waymark records to read (JSONL or a JSON array).
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        long_help = "Read waymark records from FILE. Use '-' or omit the flag to read from\n\
standard input. Each line holds one record produced by the waymark parser."
    )]
    pub records: Option<PathBuf>,

    /// Terminal width used for wrapping.
    #[arg(
        long,
        global = true,
        env = "WAYMARK_WIDTH",
        value_name = "COLUMNS",
        value_parser = clap::value_parser!(u16).range(1..),
        long_help = "Terminal width used for wrapping.\n\n\
If omitted, the COLUMNS environment variable is used when it holds a positive\n\
integer, then the live terminal width, then 80."
    )]
    pub width: Option<u16>,

    /// Do not wrap long content.
    #[arg(long, global = true)]
    pub no_wrap: bool,

    /// One line per waymark: `path:line  type ::: content`.
    #[arg(
        long,
        global = true,
        long_help = "Print one line per waymark prefixed with its path and line number,\n\
instead of file-grouped, column-aligned blocks."
    )]
    pub compact: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        long_help = "Disable colored output. Color is also disabled when stdout is not a\n\
terminal."
    )]
    pub no_color: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter waymarks with a query and print the matches.
    #[command(
        long_about = r##"Compile QUERY, keep the records it matches and print them.

Query syntax:
    todo fix         types (canonical names, aliases, plurals: todos, to-do)
    @agent           mentions
    #perf:hotpath    tags
    owner:@alice     property equals value
    from:            property present
    !fix !@bob !#wip exclusions
    '"race cond"'    quoted free text
    anything else    free text

Arguments are joined with spaces before the query is read, so shell quoting
alone does not keep a phrase together: `wm find 'race cond'` searches for
"race" and "cond" separately. Put double quotes inside the argument to search
for a phrase.

Examples:
    wm find todo @agent
    wm find "#perf" !fix --compact
"##
    )]
    Find {
        /// Query terms (joined with spaces).
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,
    },

    /// Print the filter compiled from a query as JSON.
    Query {
        /// Query terms (joined with spaces).
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,
    },

    /// Print the render tokens of a content string.
    Tokens {
        /// Waymark content, e.g. "fix bug #perf owner:@alice".
        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Wrap a content string to the terminal width.
    Wrap {
        /// Waymark content.
        #[arg(value_name = "CONTENT")]
        content: String,

        /// Columns already used left of the content.
        #[arg(long, default_value = "0", value_name = "N")]
        indent: usize,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|e| {
        log::warn!("{}, falling back to text", e);
        OutputFormat::default()
    });
    let width = cli.width.map(usize::from);
    let color = !cli.no_color && std::io::stdout().is_terminal();

    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(color)
        .with_display(RenderOptions {
            compact: cli.compact,
            no_wrap: cli.no_wrap,
            width,
        });

    match cli.command {
        Commands::Find { query } => {
            crate::query::api::run_find(cli.records.as_deref(), &query, render_config)
        }

        Commands::Query { query } => crate::query::api::run_query(&query, cli.pretty),

        Commands::Tokens { content } => {
            crate::display::api::run_tokens(&content, format, cli.pretty)
        }

        Commands::Wrap { content, indent } => crate::display::api::run_wrap(
            &content,
            WrapConfig {
                no_wrap: cli.no_wrap,
                ..WrapConfig::new(width, indent)
            },
        ),
    }
}
