//! Locates the start (column headers) and end (footer phrases) of statement tables on each page,
//! and derives the column boundaries of a table from its headers.

use anyhow::Result;
use hashbrown::HashMap;
use lazy_regex::regex_captures;

use crate::{
    error::MalformedInput,
    geom::{PdfPoints, PdfRect},
    layout::Layout,
    locate::PageWords,
};

/// Header rectangles of the four columns of one table, in column order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnAnchors {
    pub date: PdfRect,
    pub description: PdfRect,
    pub debit: PdfRect,
    pub credit: PdfRect,
}

impl ColumnAnchors {
    fn from_array([date, description, debit, credit]: [PdfRect; 4]) -> Self {
        Self {
            date,
            description,
            debit,
            credit,
        }
    }

    pub fn to_array(self) -> [PdfRect; 4] {
        [self.date, self.description, self.debit, self.credit]
    }
}

/// Top of a table: the header row and the account the table belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableStart {
    /// Zero-based page index.
    pub page: usize,
    pub account: String,
    pub anchors: ColumnAnchors,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndKind {
    /// The account's statement ends here.
    Hard,
    /// The table continues on a later page of the same statement.
    Soft,
}

/// Bottom of a table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableEnd {
    /// Zero-based page index.
    pub page: usize,
    pub kind: EndKind,
    pub rect: PdfRect,
}

/// Finds every table header in the document, in page order.
pub fn find_starts(layout: &Layout, pages: &[PageWords]) -> Result<Vec<TableStart>> {
    let mut starts = Vec::new();
    for page in pages {
        for group in header_groups(layout, page) {
            let anchors = ColumnAnchors::from_array(group);
            let account = find_account(layout, page, &anchors)?;
            log::debug!(
                "Found table header for account {:?} on page index {}.",
                account,
                page.index
            );
            starts.push(TableStart {
                page: page.index,
                account,
                anchors,
            });
        }
    }
    Ok(starts)
}

/// Finds every table footer in the document, in page order.
///
/// Each page yields one hard end per occurrence of the hard end phrase, followed by at most one
/// soft end.
pub fn find_ends(layout: &Layout, pages: &[PageWords]) -> Vec<TableEnd> {
    let mut ends = Vec::new();
    for page in pages {
        ends.extend(
            page.search_text(&layout.hard_end)
                .into_iter()
                .map(|rect| TableEnd {
                    page: page.index,
                    kind: EndKind::Hard,
                    rect,
                }),
        );

        let soft = layout
            .soft_ends
            .iter()
            .find_map(|phrase| page.search_text(phrase).into_iter().next());
        if let Some(mut rect) = soft {
            rect.top -= layout.soft_end_lift;
            ends.push(TableEnd {
                page: page.index,
                kind: EndKind::Soft,
                rect,
            });
        }
    }
    ends
}

/// Groups the header words of a page into one set of four rectangles per table.
///
/// The n-th occurrence of each header word belongs to the n-th table on the page, so a page has
/// as many tables as its least frequent header word.
fn header_groups(layout: &Layout, page: &PageWords) -> Vec<[PdfRect; 4]> {
    let labels = layout.headers.in_order();
    let mut found: HashMap<&str, Vec<PdfRect>> = HashMap::new();
    for word in &page.words {
        if labels.contains(&word.text.as_str()) {
            found.entry(word.text.as_str()).or_default().push(word.rect);
        }
    }

    let columns = labels.map(|label| found.get(label).map(Vec::as_slice).unwrap_or_default());
    let num_groups = columns.iter().map(|rects| rects.len()).min().unwrap_or(0);
    (0..num_groups)
        .map(|i| columns.map(|rects| rects[i]))
        .collect()
}

/// Reads the account number from the band of text just above the table header.
fn find_account(layout: &Layout, page: &PageWords, anchors: &ColumnAnchors) -> Result<String> {
    let band_spec = &layout.account_band;
    let mut band = PdfRect::union_all([&anchors.date, &anchors.credit]);
    band.top -= band_spec.above_top;
    band.bottom -= band_spec.above_bottom;
    band.left -= band_spec.margin;
    band.right += band_spec.margin;

    let label = page.text_within(&band);
    let account = regex_captures!(r"N°([\s0-9a-z]+)", &label)
        .map(|(_, number)| number.trim().to_string())
        .filter(|number| !number.is_empty())
        .ok_or(MalformedInput::NoAccountNumber { page: page.index })?;
    Ok(account)
}

/// Adjusts the raw header rectangles into rectangles spanning each whole column, down to the
/// top of `end`.
pub fn fix_start(layout: &Layout, start: &ColumnAnchors, end: &PdfRect) -> ColumnAnchors {
    let ColumnAnchors {
        mut date,
        mut description,
        mut debit,
        mut credit,
    } = *start;
    let bottom = end.top;

    // Amounts are right-aligned and often wider than their header.
    for amount in [&mut debit, &mut credit] {
        amount.left -= layout.amount_column.left;
        amount.right += layout.amount_column.right;
    }

    date.include_point(description.bottom_left());
    date.left -= layout.date_column.left;
    date.right -= layout.date_column.right;

    description.include_point(debit.bottom_left());
    description.left -= layout.description_column.left;
    description.right -= layout.description_column.right;

    for column in [&mut date, &mut description, &mut debit, &mut credit] {
        column.bottom = bottom;
    }

    ColumnAnchors {
        date,
        description,
        debit,
        credit,
    }
}

/// Left edges of the adjusted columns, in column order.
pub fn columns_x(layout: &Layout, start: &ColumnAnchors, end: &PdfRect) -> [PdfPoints; 4] {
    fix_start(layout, start, end)
        .to_array()
        .map(|column| column.top_left().x)
}

/// Area enclosing all the adjusted columns.
pub fn search_area(layout: &Layout, start: &ColumnAnchors, end: &PdfRect) -> PdfRect {
    PdfRect::union_all(&fix_start(layout, start, end).to_array())
}
