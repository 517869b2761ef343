//! Report files of extracted transactions.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use extraction::process::FinalRecord;

/// Writes `records` as CSV to `path`, replacing any existing file atomically.
pub fn write_csv(path: &Path, records: &[FinalRecord]) -> Result<()> {
    write_atomically(path, |file| write_csv_to(file, records))
}

/// Writes `records` as an HTML table to `path`, replacing any existing file atomically.
pub fn write_html(path: &Path, records: &[FinalRecord]) -> Result<()> {
    write_atomically(path, |file| write_html_to(file, records))
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut AtomicWriteFile) -> Result<()>,
{
    let mut file =
        AtomicWriteFile::open(path).with_context(|| format!("opening {:?} for writing", path))?;
    write(&mut file).with_context(|| format!("writing report {:?}", path))?;
    file.commit()
        .with_context(|| format!("committing report {:?}", path))?;
    log::info!("Wrote report {:?}.", path);
    Ok(())
}

pub fn write_csv_to<W: Write>(writer: W, records: &[FinalRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record(["Account", "Date", "Description", "Value"])?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_html_to<W: Write>(mut writer: W, records: &[FinalRecord]) -> Result<()> {
    writeln!(writer, "<table class=\"transactions\">")?;
    writeln!(writer, "  <thead>")?;
    writeln!(
        writer,
        "    <tr><th>Account</th><th>Date</th><th>Description</th><th>Value</th></tr>"
    )?;
    writeln!(writer, "  </thead>")?;
    writeln!(writer, "  <tbody>")?;
    for record in records {
        writeln!(
            writer,
            "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.account),
            record.date,
            escape_html(&record.description).replace('\n', "<br>"),
            record.value,
        )?;
    }
    writeln!(writer, "  </tbody>")?;
    writeln!(writer, "</table>")?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
