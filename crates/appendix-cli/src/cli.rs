//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, ArgMatches, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use appendix_cli::edits::{Assignment, Edit};
use appendix_model::MoveDirection;

#[derive(Parser)]
#[command(
    name = "appendix-wizard",
    version,
    about = "Attach PDF appendices to a document, each behind its own title page",
    long_about = "Convert a word-processor document to PDF and append PDF appendices to it.\n\n\
                  Every appendix gets a generated title page. Appendices can be renamed,\n\
                  reordered and limited to selected pages. Conversion uses LibreOffice."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// LibreOffice executable (overrides `conversion.program`).
    #[arg(long = "soffice", value_name = "PROGRAM", global = true)]
    pub soffice: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert the base document and merge it with the appendices.
    Assemble(AssembleArgs),

    /// Show how appendices would be labelled, without assembling.
    List(ListArgs),

    /// Check a page range expression.
    Pages(PagesArgs),

    /// Report whether conversion and live document discovery are available.
    Doctor,
}

#[derive(Parser)]
#[command(group(ArgGroup::new("base_source").required(true).args(["base", "live"])))]
pub struct AssembleArgs {
    /// Base document to convert.
    #[arg(long = "base", value_name = "DOCX")]
    pub base: Option<PathBuf>,

    /// Use the document open in the running word processor.
    #[arg(long = "live")]
    pub live: bool,

    /// Appendix PDF. Repeat in output order.
    #[arg(long = "appendix", value_name = "PDF")]
    pub appendices: Vec<PathBuf>,

    /// Title for an appendix, e.g. `B=Survey results`.
    #[arg(long = "title", value_name = "LABEL=TEXT")]
    pub titles: Vec<Assignment>,

    /// Pages to include from an appendix, e.g. `A=1-3,5`. Empty means all.
    #[arg(long = "pages", value_name = "LABEL=EXPR")]
    pub pages: Vec<Assignment>,

    /// Remove an appendix.
    #[arg(long = "remove", value_name = "LABEL")]
    pub remove: Vec<String>,

    /// Move an appendix one place up.
    #[arg(long = "move-up", value_name = "LABEL")]
    pub move_up: Vec<String>,

    /// Move an appendix one place down.
    #[arg(long = "move-down", value_name = "LABEL")]
    pub move_down: Vec<String>,

    /// Output PDF. Without it you are asked, with a suggested name.
    #[arg(long = "output", short = 'o', value_name = "PDF")]
    pub output: Option<PathBuf>,
}

impl AssembleArgs {
    /// Edits in the order they were given on the command line.
    pub fn ordered_edits(&self, matches: &ArgMatches) -> Vec<Edit> {
        let positions = |id: &str| -> Vec<usize> {
            matches
                .indices_of(id)
                .map(Iterator::collect)
                .unwrap_or_default()
        };
        let mut edits: Vec<(usize, Edit)> = Vec::new();
        edits.extend(
            positions("titles")
                .into_iter()
                .zip(self.titles.iter().cloned().map(Edit::Title)),
        );
        edits.extend(
            positions("pages")
                .into_iter()
                .zip(self.pages.iter().cloned().map(Edit::Pages)),
        );
        edits.extend(
            positions("remove")
                .into_iter()
                .zip(self.remove.iter().cloned().map(Edit::Remove)),
        );
        edits.extend(positions("move_up").into_iter().zip(
            self.move_up
                .iter()
                .map(|label| Edit::Move(label.clone(), MoveDirection::Up)),
        ));
        edits.extend(positions("move_down").into_iter().zip(
            self.move_down
                .iter()
                .map(|label| Edit::Move(label.clone(), MoveDirection::Down)),
        ));
        edits.sort_by_key(|(position, _)| *position);
        edits.into_iter().map(|(_, edit)| edit).collect()
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Appendix PDF. Repeat in output order.
    #[arg(long = "appendix", value_name = "PDF", required = true)]
    pub appendices: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct PagesArgs {
    /// Expression such as `1-3, 7`.
    #[arg(value_name = "EXPR")]
    pub expr: String,

    /// Page count of the document the expression applies to.
    #[arg(long = "max", value_name = "N")]
    pub max: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
