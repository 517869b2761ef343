//! Pairs table starts with table ends into per-page regions, and joins the grids extracted from
//! consecutive regions into one table per account statement.

use std::fmt;

use anyhow::{Context, Result};

use crate::{
    error::MalformedInput,
    geom::{PdfPoints, PdfRect},
    layout::Layout,
    normalize::{self, StatementCells},
    regions::{self, EndKind, TableEnd, TableStart},
    table::Table,
};

/// One physical table instance on one page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRegion {
    /// Zero-based page index.
    pub page: usize,
    pub rect: PdfRect,
    /// Left edges of the date, description, debit and credit columns.
    pub columns: [PdfPoints; 4],
    pub account: String,
}

/// Element of the region sequence of a document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableRegion {
    Region(PageRegion),
    /// No continuation follows the preceding regions: the account's statement is complete.
    Break,
}

impl fmt::Display for TableRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRegion::Region(region) => write!(
                f,
                "page {} account {} area {} columns [{}, {}, {}, {}]",
                region.page + 1,
                region.account,
                region.rect,
                region.columns[0],
                region.columns[1],
                region.columns[2],
                region.columns[3],
            ),
            TableRegion::Break => f.write_str("break"),
        }
    }
}

/// Request for the raw grid of one region.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionSpec {
    /// One-based page number.
    pub page: i32,
    pub area: PdfRect,
    pub columns: [PdfPoints; 4],
}

/// Normalised rows of one account's statement, joined across pages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountTable {
    pub account: String,
    pub rows: Vec<StatementCells>,
}

/// Pairs each start with the first unused end on its page.
///
/// Starts and ends are both in page order; ends on pages before a start can never match it and
/// are discarded. A hard end is followed by [TableRegion::Break].
pub fn pair_regions(
    layout: &Layout,
    starts: &[TableStart],
    ends: &[TableEnd],
) -> Result<Vec<TableRegion>> {
    let mut ends = ends.iter().peekable();
    let mut regions = Vec::with_capacity(starts.len() * 2);

    for start in starts {
        while ends.next_if(|end| end.page < start.page).is_some() {}
        let end = ends
            .next_if(|end| end.page == start.page)
            .ok_or(MalformedInput::NoTableEnd { page: start.page })
            .with_context(|| format!("pairing table of account {:?}", start.account))?;

        regions.push(TableRegion::Region(PageRegion {
            page: start.page,
            rect: regions::search_area(layout, &start.anchors, &end.rect),
            columns: regions::columns_x(layout, &start.anchors, &end.rect),
            account: start.account.clone(),
        }));
        if end.kind == EndKind::Hard {
            regions.push(TableRegion::Break);
        }
    }

    Ok(regions)
}

/// Grid requests for the regions, in order, skipping breaks.
pub fn region_specs(regions: &[TableRegion]) -> Vec<RegionSpec> {
    regions
        .iter()
        .filter_map(|region| match region {
            TableRegion::Region(region) => Some(RegionSpec {
                page: region.page as i32 + 1,
                area: region.rect,
                columns: region.columns,
            }),
            TableRegion::Break => None,
        })
        .collect()
}

/// Joins the grids of consecutive regions into one table per account statement.
///
/// `grids` holds one grid per [TableRegion::Region], in order. When there are fewer grids than
/// regions, the remaining regions are ignored.
pub fn concatenate_grids(regions: &[TableRegion], grids: Vec<Table>) -> Result<Vec<AccountTable>> {
    let mut grids = grids.into_iter();
    let mut tables = Vec::new();
    let mut running: Option<AccountTable> = None;

    for (index, region) in regions.iter().enumerate() {
        match region {
            TableRegion::Region(region) => {
                let Some(grid) = grids.next() else {
                    log::warn!(
                        "Ran out of extracted grids at region index {}, ignoring the remaining regions.",
                        index
                    );
                    break;
                };
                let rows = normalize::fix(grid).with_context(|| {
                    format!("normalising grid of page index {}", region.page)
                })?;
                running
                    .get_or_insert_with(|| AccountTable {
                        account: region.account.clone(),
                        rows: Vec::new(),
                    })
                    .rows
                    .extend(rows);
            }
            TableRegion::Break => tables.extend(running.take()),
        }
    }
    tables.extend(running);

    let unused = grids.count();
    if unused > 0 {
        log::warn!("Ignoring {} extracted grids without a region.", unused);
    }

    Ok(tables)
}
