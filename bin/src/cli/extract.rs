use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result, bail};
use clap::Args;
use extraction::{
    process::{FinalRecord, StatementProcessor},
    tabula_wrapper::{CellExtractor, TabulaCellExtractor, client::TabulaClient},
};
use simple_bar::ProgressBar;

use super::args::{LayoutArgs, TabulaArgs};
use crate::{pdf::PdfLoader, report};

/// Extracts the transactions of statement PDFs into a CSV report.
#[derive(Args, Debug)]
pub struct Command {
    /// Statement PDFs, or directories searched recursively for them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Path to the CSV file to write.
    #[arg(long)]
    output: PathBuf,

    /// Path to an HTML file to also write the transactions to.
    #[arg(long)]
    html: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(flatten)]
    tabula: TabulaArgs,

    /// Skip statements that fail to process instead of stopping.
    #[arg(long)]
    keep_going: bool,

    /// Do not show a progress bar.
    #[arg(long, default_value = "false")]
    no_progress: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command, xdg_dirs: &xdg::BaseDirectories) -> Result<()> {
    let layout = cmd.layout.load(xdg_dirs)?;
    let statements = find_statements(&cmd.inputs)?;
    if statements.is_empty() {
        bail!("no statement PDFs found in {:?}", cmd.inputs);
    }

    let tabula = TabulaClient::new(&cmd.tabula.libpath()?).context("initialising Tabula")?;
    let processor = StatementProcessor::new(layout, TabulaCellExtractor::new(tabula));
    let loader = PdfLoader::new()?;

    let continue_intent = Arc::new(AtomicBool::new(true));
    {
        let continue_intent = continue_intent.clone();
        ctrlc::set_handler(move || continue_intent.store(false, Ordering::SeqCst))
            .context("installing interrupt handler")?;
    }

    let mut progress_bar =
        (!cmd.no_progress).then(|| ProgressBar::cargo_style(statements.len() as u32, 80, true));
    let mut records = Vec::new();
    let mut skipped = 0;

    for path in &statements {
        if !continue_intent.load(Ordering::Relaxed) {
            bail!("interrupted before processing {:?}", path);
        }

        match extract_statement(&loader, &processor, path) {
            Ok(statement_records) => records.extend(statement_records),
            Err(err) if cmd.keep_going => {
                log::warn!("Skipping statement {:?}: {:#}.", path, err);
                skipped += 1;
            }
            Err(err) => return Err(err),
        }

        if let Some(progress_bar) = progress_bar.as_mut() {
            progress_bar.update();
        }
    }

    report::write_csv(&cmd.output, &records)?;
    if let Some(html) = &cmd.html {
        report::write_html(html, &records)?;
    }

    eprintln!(
        "Extracted {} transactions from {} statements ({} skipped).",
        records.len(),
        statements.len() - skipped,
        skipped
    );
    Ok(())
}

fn extract_statement<C: CellExtractor>(
    loader: &PdfLoader,
    processor: &StatementProcessor<C>,
    path: &Path,
) -> Result<Vec<FinalRecord>> {
    let document = loader.load_document(path)?;
    processor
        .process(&document)
        .with_context(|| format!("processing statement {:?}", path))
}

/// Expands `inputs` into statement PDF paths. Directories are searched recursively for `.pdf`
/// files, in file name order; files are taken as given.
fn find_statements(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut statements = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            statements.push(input.clone());
            continue;
        }
        for entry in walkdir::WalkDir::new(input)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("searching {:?}", input))?;
            if entry.file_type().is_file() && is_pdf(entry.path()) {
                statements.push(entry.into_path());
            }
        }
    }
    log::debug!("Found {} statements.", statements.len());
    Ok(statements)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"))
}
