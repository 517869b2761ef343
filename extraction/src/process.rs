//! End-to-end processing of one statement document into transaction records.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    dates::StatementPeriod,
    layout::Layout,
    locate::PageWords,
    regions, rows, segment,
    segment::TableRegion,
    tabula_wrapper::CellExtractor,
};

/// A statement PDF with the words of each of its pages.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: PathBuf,
    /// File name, which carries the statement period.
    pub name: String,
    pub period: StatementPeriod,
    pub pages: Vec<PageWords>,
}

impl Document {
    /// Creates a [Document], reading the statement period from the file name of `path`.
    pub fn new(path: &Path, pages: Vec<PageWords>) -> Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let period = StatementPeriod::from_document_name(&name)?;
        Ok(Self {
            path: path.to_owned(),
            name,
            period,
            pages,
        })
    }
}

/// A transaction of an account, as written to reports.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FinalRecord {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Value")]
    pub value: Decimal,
}

/// Extracts the transactions of statement documents.
pub struct StatementProcessor<C> {
    layout: Layout,
    cells: C,
}

impl<C: CellExtractor> StatementProcessor<C> {
    pub fn new(layout: Layout, cells: C) -> Self {
        Self { layout, cells }
    }

    /// Locates the table regions of `document`. See [table_regions].
    pub fn regions(&self, document: &Document) -> Result<Vec<TableRegion>> {
        table_regions(&self.layout, document)
    }

    /// Returns the transactions of `document`, grouped by account in statement order.
    pub fn process(&self, document: &Document) -> Result<Vec<FinalRecord>> {
        let regions = self.regions(document)?;
        let specs = segment::region_specs(&regions);
        let grids = self
            .cells
            .extract_cell_grids(&document.path, &specs)
            .context("extracting table cells")?;
        let tables = segment::concatenate_grids(&regions, grids)?;

        let mut records = Vec::new();
        for table in &tables {
            let account_rows = rows::reconstruct(&table.rows)
                .with_context(|| format!("reading transactions of account {:?}", table.account))?;
            for row in account_rows {
                let date = document.period.resolve(&row.date).with_context(|| {
                    format!("dating transaction of account {:?}", table.account)
                })?;
                records.push(FinalRecord {
                    account: table.account.clone(),
                    date,
                    description: row.description,
                    value: row.value,
                });
            }
        }

        log::info!(
            "Read {} transactions of {} accounts from {:?}.",
            records.len(),
            tables.len(),
            document.name
        );
        Ok(records)
    }
}

/// Locates the table regions of `document`, with a break after each account's last region.
pub fn table_regions(layout: &Layout, document: &Document) -> Result<Vec<TableRegion>> {
    let starts =
        regions::find_starts(layout, &document.pages).context("locating table headers")?;
    let ends = regions::find_ends(layout, &document.pages);
    log::debug!(
        "Found {} table starts and {} table ends in {:?}.",
        starts.len(),
        ends.len(),
        document.name
    );
    segment::pair_regions(layout, &starts, &ends)
}

#[cfg(test)]
mod tests;
