//! Reads the words of statement PDFs with pdfium.

use std::path::Path;

use anyhow::{Context, Result};
use extraction::{
    geom::PdfRect,
    locate::{PageWords, Word},
    process::Document,
};
use pdfium_render::prelude::{PdfPage, Pdfium};

/// Loads statement documents. pdfium is single threaded, so a [PdfLoader] must stay on the
/// thread that created it.
pub struct PdfLoader {
    pdfium: Pdfium,
}

impl PdfLoader {
    pub fn new() -> Result<Self> {
        let bindings =
            Pdfium::bind_to_statically_linked_library().context("binding to pdfium")?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Loads the PDF at `path` with the words of each of its pages.
    pub fn load_document(&self, path: &Path) -> Result<Document> {
        let pdf = self
            .pdfium
            .load_pdf_from_file(path, None)
            .with_context(|| format!("loading PDF {:?}", path))?;

        let mut pages = Vec::new();
        for (index, page) in pdf.pages().iter().enumerate() {
            let chars = page_chars(&page)
                .with_context(|| format!("reading text of page index {} of {:?}", index, path))?;
            pages.push(words_from_chars(index, chars));
        }
        log::debug!("Loaded {} pages from {:?}.", pages.len(), path);

        Document::new(path, pages)
    }
}

/// Characters of `page` with their bounds, in the top-left origin coordinate system.
fn page_chars(page: &PdfPage) -> Result<Vec<(char, PdfRect)>> {
    let height = page.height().value;
    let text = page.text()?;
    let chars = text
        .chars()
        .iter()
        .filter_map(|ch| {
            let c = ch.unicode_char()?;
            let bounds = ch.loose_bounds().ok()?;
            Some((
                c,
                PdfRect::new(
                    bounds.left.value,
                    height - bounds.top.value,
                    bounds.right.value,
                    height - bounds.bottom.value,
                ),
            ))
        })
        .collect();
    Ok(chars)
}

/// Groups the characters of a page into words.
///
/// Whitespace and control characters separate words, as does a character that does not continue
/// the line of its predecessor.
pub fn words_from_chars<I>(index: usize, chars: I) -> PageWords
where
    I: IntoIterator<Item = (char, PdfRect)>,
{
    let mut words = Vec::new();
    let mut text = String::new();
    let mut rect = PdfRect::default();
    let mut last: Option<PdfRect> = None;

    let mut flush = |text: &mut String, rect: &mut PdfRect| {
        if !text.is_empty() {
            words.push(Word::new(std::mem::take(text), std::mem::take(rect)));
        }
    };

    for (c, char_rect) in chars {
        if c.is_whitespace() || c.is_control() {
            flush(&mut text, &mut rect);
            last = None;
            continue;
        }
        if last.is_some_and(|prev| breaks_line(&prev, &char_rect)) {
            flush(&mut text, &mut rect);
        }
        text.push(c);
        rect.include_rect(&char_rect);
        last = Some(char_rect);
    }
    flush(&mut text, &mut rect);

    PageWords { index, words }
}

/// A character breaks the line when it moves back left of its predecessor, or vertically by
/// more than half its predecessor's height.
fn breaks_line(prev: &PdfRect, next: &PdfRect) -> bool {
    let jump = (next.top - prev.top).to_f32().abs();
    next.left < prev.left || jump > prev.height().to_f32() / 2.0
}
