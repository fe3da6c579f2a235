use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use appendix_assembly::{AssemblyHandle, AssemblyOutcome, AssemblyServices, AssemblyUpdate, Session};
use appendix_cli::edits::{Edit, apply};
use appendix_cli::prompt::ask_on_terminal;
use appendix_cli::settings::Settings;
use appendix_cli::summary::{apply_table_style, header_cell, print_appendices};
use appendix_convert::{active_document_source, discover_active_document};
use appendix_model::{AppendixRegistry, PageRange};
use appendix_pdf::PdfPageCounter;

use crate::cli::{AssembleArgs, ListArgs, PagesArgs};

pub fn run_assemble(
    args: &AssembleArgs,
    edits: &[Edit],
    settings: &Settings,
    show_progress: bool,
) -> Result<AssemblyOutcome> {
    let span = info_span!("assemble");
    let _guard = span.enter();

    let base = match &args.base {
        Some(base) => base.clone(),
        None => discover_active_document().context("cannot use the live document")?,
    };
    info!(base = %base.display(), "base document");

    let mut session = Session::new();
    session.connect_base(&base)?;
    let report = session.add_sources(&args.appendices, &PdfPageCounter)?;
    for error in &report.failed {
        warn!(%error, "appendix skipped");
        eprintln!("warning: skipped appendix: {error}");
    }
    for edit in edits {
        apply(&mut session, edit).with_context(|| format!("cannot apply {edit}"))?;
    }
    print_appendices(session.registry());

    let services = AssemblyServices {
        converter: Arc::new(settings.converter()),
        title_style: settings.title_style(),
        output_suffix: settings.output.file_suffix.clone(),
        scratch_root: None,
    };
    let mut handle = session.start_assembly(services)?;
    let spinner = phase_spinner(show_progress);
    let result = drive(&handle, &spinner, args.output.as_deref());
    spinner.finish_and_clear();
    handle.join();
    session.finish_assembly()?;
    result
}

/// Forward worker updates to the spinner and answer the location request.
fn drive(
    handle: &AssemblyHandle,
    spinner: &ProgressBar,
    output: Option<&Path>,
) -> Result<AssemblyOutcome> {
    for update in handle.updates() {
        match update {
            AssemblyUpdate::Phase(phase) => {
                info!(%phase, "phase");
                spinner.set_message(phase.to_string());
            }
            AssemblyUpdate::LocationRequested(request) => {
                let location = match output {
                    Some(path) => Some(path.to_path_buf()),
                    None => spinner
                        .suspend(|| ask_on_terminal(request.suggested()))
                        .context("failed to read the output location")?,
                };
                request.respond(location);
            }
            AssemblyUpdate::Finished(result) => return result.context("assembly failed"),
        }
    }
    bail!("assembly stopped without reporting a result")
}

fn phase_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Returns false when some sources could not be read.
pub fn run_list(args: &ListArgs) -> Result<bool> {
    let mut registry = AppendixRegistry::new();
    let report = registry.add_sources(&args.appendices, &PdfPageCounter);
    for error in &report.failed {
        eprintln!("warning: skipped appendix: {error}");
    }
    print_appendices(&registry);
    Ok(report.is_complete())
}

pub fn run_pages(args: &PagesArgs) -> Result<()> {
    let range = PageRange::parse(&args.expr, args.max)
        .with_context(|| format!("invalid page range '{}'", args.expr))?;
    let pages: Vec<String> = range.page_numbers().map(|page| page.to_string()).collect();
    println!("{} of {} pages: {}", range.len(), args.max, pages.join(", "));
    Ok(())
}

/// Returns false when conversion is unavailable.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> Result<bool> {
    let converter = settings.converter();
    let version = converter.version();
    let discovery = active_document_source().is_some();

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Converter"),
        status_cell(version.is_some()),
        Cell::new(match &version {
            Some(version) => format!("{} ({version})", converter.program().display()),
            None => format!("'{}' could not be started", converter.program().display()),
        }),
    ]);
    table.add_row(vec![
        Cell::new("Live document"),
        status_cell(discovery),
        Cell::new(if discovery {
            "Word automation through PowerShell"
        } else {
            "not supported on this platform; use --base"
        }),
    ]);
    table.add_row(vec![
        Cell::new("Settings"),
        status_cell(true),
        Cell::new(if config_path.exists() {
            config_path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", config_path.display())
        }),
    ]);
    println!("{table}");
    Ok(version.is_some())
}

fn status_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("ok").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Red)
    }
}
