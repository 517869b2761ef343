use anyhow::{Context, Result};

use super::{JsonTableSet, TabulaExtractionRequest, TabulaExtractor};

/// [TabulaExtractor] backed by a Tabula JVM.
///
/// The JVM is attached to the calling thread for each request.
pub struct TabulaClient {
    vm: tabula::TabulaVM,
}

impl TabulaClient {
    /// Starts a Tabula JVM from the Tabula jar at `libpath`.
    pub fn new(libpath: &str) -> Result<Self> {
        let vm = tabula::TabulaVM::new(libpath, false)
            .with_context(|| format!("starting Tabula from {:?}", libpath))?;
        Ok(Self { vm })
    }
}

impl TabulaExtractor for TabulaClient {
    fn extract_tables(&self, request: TabulaExtractionRequest) -> Result<JsonTableSet> {
        let env = self.vm.attach().context("attaching to TabulaVM")?;
        let pages = [request.page];
        let page_areas = [request.page_area];

        // Basic is the stream method; statement tables have no ruling lines.
        let tabula = env
            .configure_tabula(
                Some(&page_areas),
                Some(&pages),
                tabula::OutputFormat::Json,
                false,
                tabula::ExtractionMethod::Basic,
                false,
                None,
            )
            .context("configuring Tabula to extract table")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracted table data")?;
        tabula
            .parse_document_into(&request.pdf_path, extracted_file.path())
            .context("extracting table data")?;

        serde_json::from_reader(extracted_file).context("parsing JSON output from Tabula")
    }
}
