use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use extraction::process;

use super::args::LayoutArgs;
use crate::pdf::PdfLoader;

/// Prints the table regions detected in a statement PDF.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the statement PDF.
    pdf: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
}

/// Runs the subcommand.
pub fn run(cmd: &Command, xdg_dirs: &xdg::BaseDirectories) -> Result<()> {
    let layout = cmd.layout.load(xdg_dirs)?;
    let document = PdfLoader::new()?.load_document(&cmd.pdf)?;

    let regions = process::table_regions(&layout, &document)
        .with_context(|| format!("locating tables in {:?}", cmd.pdf))?;
    println!(
        "{}: statement {:04}-{:02}, {} pages",
        document.name,
        document.period.year,
        document.period.month,
        document.pages.len()
    );
    for region in &regions {
        println!("{}", region);
    }
    Ok(())
}
