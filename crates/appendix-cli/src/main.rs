//! Appendix wizard CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, CommandFactory, FromArgMatches};
use tracing::level_filters::LevelFilter;

use appendix_assembly::AssemblyOutcome;
use appendix_cli::hints::hint_for;
use appendix_cli::logging::{LogConfig, LogFormat, init_logging};
use appendix_cli::settings::Settings;
use appendix_cli::summary::print_report;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_assemble, run_doctor, run_list, run_pages};

const EXIT_FAILURE: i32 = 1;
const EXIT_CANCELLED: i32 = 2;

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|error| error.exit());
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {:#}", anyhow::Error::from(error));
            std::process::exit(EXIT_FAILURE);
        }
    };
    if let Some(program) = &cli.soffice {
        settings.conversion.program.clone_from(program);
    }

    let exit_code = match &cli.command {
        Command::Assemble(args) => {
            let edits = matches
                .subcommand_matches("assemble")
                .map(|sub| args.ordered_edits(sub))
                .unwrap_or_default();
            let show_progress = !cli.verbosity.is_silent() && io::stderr().is_terminal();
            match run_assemble(args, &edits, &settings, show_progress) {
                Ok(AssemblyOutcome::Completed(report)) => {
                    print_report(&report);
                    0
                }
                Ok(AssemblyOutcome::Cancelled) => {
                    eprintln!("cancelled: nothing was written");
                    EXIT_CANCELLED
                }
                Err(error) => {
                    report_error(&error, &cli);
                    EXIT_FAILURE
                }
            }
        }
        Command::List(args) => match run_list(args) {
            Ok(true) => 0,
            Ok(false) => EXIT_FAILURE,
            Err(error) => {
                report_error(&error, &cli);
                EXIT_FAILURE
            }
        },
        Command::Pages(args) => match run_pages(args) {
            Ok(()) => 0,
            Err(error) => {
                report_error(&error, &cli);
                EXIT_FAILURE
            }
        },
        Command::Doctor => {
            let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
            match run_doctor(&settings, &config_path) {
                Ok(true) => 0,
                Ok(false) => EXIT_FAILURE,
                Err(error) => {
                    report_error(&error, &cli);
                    EXIT_FAILURE
                }
            }
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error, cli: &Cli) {
    eprintln!("error: {error:#}");
    let config = cli.config.clone().unwrap_or_else(Settings::config_path);
    if let Some(hint) = hint_for(error, &config) {
        eprintln!("hint: {hint}");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
