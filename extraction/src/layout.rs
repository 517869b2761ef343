//! Geometric and textual constants of the statement template.
//!
//! The defaults are tuned to the Caisse d'Epargne "RELEVES" statement layout. A YAML file may
//! override any subset of them; fields it does not name keep their default value.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::geom::PdfPoints;

/// Complete set of template constants used to locate and bound statement tables.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Column header tokens marking the top of a table.
    pub headers: HeaderLabels,
    /// Band above the header containing the account label.
    pub account_band: AccountBand,
    /// Footer phrase marking the end of an account's statement.
    pub hard_end: String,
    /// Footer phrases marking the end of a page's portion of a table that continues elsewhere.
    /// Only the first phrase found on a page is used.
    pub soft_ends: Vec<String>,
    /// Distance the top of a soft end is moved upwards.
    pub soft_end_lift: PdfPoints,
    /// Widening applied to the debit and credit header rectangles.
    pub amount_column: ColumnAdjust,
    /// Horizontal shift applied to the date header rectangle, after extending it to the
    /// description column.
    pub date_column: ColumnAdjust,
    /// Horizontal shift applied to the description header rectangle, after extending it to the
    /// debit column.
    pub description_column: ColumnAdjust,
}

impl Layout {
    /// Loads a [Layout] from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening layout file {:?}", path))?;
        serde_yaml_ng::from_reader(file).with_context(|| format!("parsing layout file {:?}", path))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            headers: HeaderLabels::default(),
            account_band: AccountBand::default(),
            hard_end: "NOUVEAU SOLDE".to_string(),
            soft_ends: vec![
                "Perte ou vol".to_string(),
                "Caisse d'Epargne et de Prévoyance".to_string(),
            ],
            soft_end_lift: PdfPoints::from_f32(10.0),
            amount_column: ColumnAdjust {
                left: PdfPoints::from_f32(20.0),
                right: PdfPoints::from_f32(5.0),
            },
            date_column: ColumnAdjust {
                left: PdfPoints::from_f32(3.0),
                right: PdfPoints::from_f32(5.0),
            },
            description_column: ColumnAdjust {
                left: PdfPoints::from_f32(3.0),
                right: PdfPoints::from_f32(1.0),
            },
        }
    }
}

/// Literal words heading each of the four statement columns.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderLabels {
    pub date: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
}

impl HeaderLabels {
    /// Labels in column order.
    pub fn in_order(&self) -> [&str; 4] {
        [&self.date, &self.description, &self.debit, &self.credit]
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            description: "Détail".to_string(),
            debit: "Débit".to_string(),
            credit: "Crédit".to_string(),
        }
    }
}

/// Offsets from the header rectangle to the band holding the account label.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AccountBand {
    /// Band top is this far above the top of the header.
    pub above_top: PdfPoints,
    /// Band bottom is this far above the bottom of the header.
    pub above_bottom: PdfPoints,
    /// Horizontal margin added on both sides, so that words only just inside still count.
    pub margin: PdfPoints,
}

impl Default for AccountBand {
    fn default() -> Self {
        Self {
            above_top: PdfPoints::from_f32(22.0),
            above_bottom: PdfPoints::from_f32(12.0),
            margin: PdfPoints::from_f32(5.0),
        }
    }
}

/// Horizontal edge adjustment of a column rectangle. Each edge moves by its own amount; the
/// direction of the move is fixed by the column it applies to.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnAdjust {
    pub left: PdfPoints,
    pub right: PdfPoints,
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[gtest]
    fn test_partial_yaml_keeps_defaults() -> anyhow::Result<()> {
        let layout: Layout = serde_yaml_ng::from_str(
            r#"
            hard_end: "SOLDE FINAL"
            account_band:
                above_top: 30
            "#,
        )?;

        let default = Layout::default();
        expect_that!(layout.hard_end, eq("SOLDE FINAL"));
        expect_that!(layout.account_band.above_top, eq(PdfPoints::from_f32(30.0)));
        expect_that!(
            layout.account_band.above_bottom,
            eq(default.account_band.above_bottom)
        );
        expect_that!(layout.headers, eq(&default.headers));
        expect_that!(layout.soft_ends, eq(&default.soft_ends));
        Ok(())
    }

    #[gtest]
    fn test_rejects_unknown_fields() {
        expect_that!(
            serde_yaml_ng::from_str::<Layout>("hard_ending: x"),
            err(anything())
        );
    }

    #[gtest]
    fn test_empty_document_is_default() -> anyhow::Result<()> {
        let layout: Layout = serde_yaml_ng::from_str("{}")?;
        expect_that!(layout, eq(&Layout::default()));
        Ok(())
    }
}
