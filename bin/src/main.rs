use anyhow::Result;

mod cli;
mod distpaths;
mod pdf;
mod report;

fn main() -> Result<()> {
    cli::run()
}
