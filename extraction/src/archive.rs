//! Downloading statements from an online banking document archive.
//!
//! Talking to a particular bank is left to implementations of [StatementSource]; this module
//! only drives one through every available document and stores the results.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use atomic_write_file::AtomicWriteFile;

/// Opaque reference to one document of a [StatementSource].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocumentLink {
    /// Year the document is listed under.
    pub year: String,
    /// Source-specific identifier of the document within its year.
    pub id: String,
}

/// Contents of a downloaded document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DownloadedDocument {
    /// File name suggested by the source, such as `RELEVES_12345678901_20230603.pdf`.
    pub filename: String,
    pub content: Vec<u8>,
}

/// A logged-in session with a bank's document archive.
///
/// Sessions are stateful, hence every operation takes `&mut self`.
pub trait StatementSource {
    /// Years for which the archive lists documents.
    fn available_years(&mut self) -> Result<Vec<String>>;

    /// Documents listed for `year`.
    fn list_documents(&mut self, year: &str) -> Result<Vec<DocumentLink>>;

    fn download(&mut self, link: &DocumentLink) -> Result<DownloadedDocument>;
}

#[derive(Clone, Copy, Debug)]
pub struct ArchiveOptions {
    /// Replace files already present in the output directory.
    pub overwrite: bool,
    /// Pause between two downloads.
    pub delay: Duration,
    /// Number of tries of each request to the source before giving up.
    pub attempts: u32,
    /// Pause before trying a failed request again.
    pub retry_delay: Duration,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            delay: Duration::from_secs(1),
            attempts: 5,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Downloads every document of `source` into `out_dir`, returning the paths written.
pub fn archive_statements(
    source: &mut dyn StatementSource,
    out_dir: &Path,
    options: ArchiveOptions,
) -> Result<Vec<PathBuf>> {
    let years = with_retries(
        &options,
        || "listing archive years".to_string(),
        || source.available_years(),
    )?;
    log::debug!("Archive lists documents for years {:?}.", years);

    let mut written = Vec::new();
    let mut first = true;
    for year in &years {
        let links = with_retries(
            &options,
            || format!("listing documents of year {}", year),
            || source.list_documents(year),
        )?;
        log::info!("Found {} documents for year {}.", links.len(), year);

        for link in &links {
            if !first && !options.delay.is_zero() {
                std::thread::sleep(options.delay);
            }
            first = false;

            let document = with_retries(
                &options,
                || format!("downloading document {:?} of year {}", link.id, year),
                || source.download(link),
            )?;
            if let Some(path) = store_document(&document, out_dir, options.overwrite)? {
                written.push(path);
            }
        }
    }
    Ok(written)
}

/// Calls `request` until it succeeds or `options.attempts` tries have failed, pausing
/// `options.retry_delay` between tries. `action` describes the request for logs and errors.
fn with_retries<T, A, R>(options: &ArchiveOptions, action: A, mut request: R) -> Result<T>
where
    A: Fn() -> String,
    R: FnMut() -> Result<T>,
{
    let mut attempt = 1;
    loop {
        match request() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < options.attempts => {
                log::warn!(
                    "Failed {} (attempt {} of {}): {:#}. Retrying.",
                    action(),
                    attempt,
                    options.attempts,
                    err
                );
                if !options.retry_delay.is_zero() {
                    std::thread::sleep(options.retry_delay);
                }
                attempt += 1;
            }
            Err(err) => return Err(err).with_context(action),
        }
    }
}

/// Writes `document` into `out_dir`, unless a file of that name exists and `overwrite` is
/// false. Returns the written path.
fn store_document(
    document: &DownloadedDocument,
    out_dir: &Path,
    overwrite: bool,
) -> Result<Option<PathBuf>> {
    let name = Path::new(&document.filename);
    if document.filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
        bail!(
            "refusing to store document with unsafe file name {:?}",
            document.filename
        );
    }

    let path = out_dir.join(name);
    if !overwrite && path.exists() {
        log::info!("Keeping existing {:?}.", path);
        return Ok(None);
    }

    let mut file =
        AtomicWriteFile::open(&path).with_context(|| format!("opening {:?} for writing", path))?;
    file.write_all(&document.content)
        .with_context(|| format!("writing {:?}", path))?;
    file.commit()
        .with_context(|| format!("committing {:?}", path))?;
    log::info!("Wrote {:?}.", path);
    Ok(Some(path))
}
