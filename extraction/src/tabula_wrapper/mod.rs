//! Raw cell grids of statement regions, extracted with Tabula.

pub mod client;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    geom::PdfPoints,
    segment::RegionSpec,
    table::{Cell, Row, Table, cell_from_text},
};

/// Extracts one raw grid per region of a PDF file.
pub trait CellExtractor {
    /// Returns the grids of `regions`, in order. Extraction stops at the first region that yields
    /// no table, so fewer grids than regions may be returned.
    fn extract_cell_grids(&self, pdf_path: &Path, regions: &[RegionSpec]) -> Result<Vec<Table>>;
}

/// Required trait for making a single extraction call to Tabula.
pub trait TabulaExtractor {
    fn extract_tables(&self, request: TabulaExtractionRequest) -> Result<JsonTableSet>;
}

/// Single request to a [TabulaExtractor] for the tables within one area of one page.
pub struct TabulaExtractionRequest {
    pub pdf_path: PathBuf,
    /// One-based page number.
    pub page: i32,
    pub page_area: (i32, tabula::Rectangle),
}

/// A sequence of extracted tables from a PDF file.
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

/// A single extracted table from a PDF file.
#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct JsonTable {
    pub extraction_method: String,
    pub page_number: i32,
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub right: f32,
    pub bottom: f32,
    pub data: Vec<JsonRow>,
}

/// A single extracted table row from a PDF file.
#[derive(Deserialize, Debug)]
pub struct JsonRow(pub Vec<JsonCell>);

/// A single extracted table cell from a PDF file.
#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct JsonCell {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
}

/// [CellExtractor] making one Tabula call per region.
pub struct TabulaCellExtractor<T> {
    tabula: T,
}

impl<T: TabulaExtractor> TabulaCellExtractor<T> {
    pub fn new(tabula: T) -> Self {
        Self { tabula }
    }
}

impl<T: TabulaExtractor> CellExtractor for TabulaCellExtractor<T> {
    fn extract_cell_grids(&self, pdf_path: &Path, regions: &[RegionSpec]) -> Result<Vec<Table>> {
        let mut grids = Vec::with_capacity(regions.len());
        for (index, region) in regions.iter().enumerate() {
            let table_set = self
                .tabula
                .extract_tables(TabulaExtractionRequest {
                    pdf_path: pdf_path.to_owned(),
                    page: region.page,
                    page_area: region.area.to_tabula_rectangle_page_area(),
                })
                .with_context(|| {
                    format!(
                        "extracting region index {} on page {} of {:?}",
                        index, region.page, pdf_path
                    )
                })?;

            if table_set.0.is_empty() {
                log::warn!(
                    "No table found in region {} on page {} of {:?}, ignoring {} remaining regions.",
                    region.area,
                    region.page,
                    pdf_path,
                    regions.len() - index - 1,
                );
                break;
            }
            grids.push(bucket_columns(&table_set, &region.columns));
        }
        log::debug!(
            "Extracted {} grids from {} regions of {:?}.",
            grids.len(),
            regions.len(),
            pdf_path
        );
        Ok(grids)
    }
}

/// Rebuilds the rows of the extracted tables with one cell per column in `columns`.
///
/// A cell belongs to the rightmost column starting at or left of the cell's left edge, or to the
/// first column if it starts left of all of them. Cells landing in the same column are joined
/// with a space.
fn bucket_columns(table_set: &JsonTableSet, columns: &[PdfPoints]) -> Table {
    let rows = table_set
        .0
        .iter()
        .flat_map(|table| &table.data)
        .map(|json_row| {
            let mut cells: Vec<Cell> = vec![None; columns.len()];
            for json_cell in &json_row.0 {
                let Some(text) = cell_from_text(json_cell.text.trim().to_string()) else {
                    continue;
                };
                let left = PdfPoints::from_f32(json_cell.left);
                let index = columns
                    .iter()
                    .rposition(|column| *column <= left)
                    .unwrap_or(0);
                match &mut cells[index] {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(&text);
                    }
                    empty => *empty = Some(text),
                }
            }
            Row(cells)
        })
        .collect();
    Table(rows)
}
