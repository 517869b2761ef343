//! Word and phrase lookup over the words of a page.

use crate::geom::PdfRect;

/// A whitespace-delimited word on a page, with its bounding rectangle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    pub text: String,
    pub rect: PdfRect,
}

impl Word {
    pub fn new(text: impl Into<String>, rect: PdfRect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// Words of a single page, in reading order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageWords {
    /// Zero-based index of the page within its document.
    pub index: usize,
    pub words: Vec<Word>,
}

impl PageWords {
    /// Rectangles of every word that is exactly `word` (case-sensitive), in reading order.
    pub fn find_word_rects(&self, word: &str) -> Vec<PdfRect> {
        self.words
            .iter()
            .filter(|w| w.text == word)
            .map(|w| w.rect)
            .collect()
    }

    /// Rectangles of each occurrence of `phrase`, in reading order.
    ///
    /// `phrase` is searched for as a substring of each line, where a line is a run of
    /// consecutive words on one line with their texts joined by single spaces. The rectangle of
    /// an occurrence is the union of the words it overlaps, so punctuation attached to a word
    /// does not prevent a match.
    pub fn search_text(&self, phrase: &str) -> Vec<PdfRect> {
        let needle = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        if needle.is_empty() {
            return Vec::new();
        }

        self.words
            .chunk_by(|a, b| same_line(&a.rect, &b.rect))
            .flat_map(|line| line_matches(line, &needle))
            .collect()
    }

    /// Texts of the words lying entirely inside `area`, joined by single spaces.
    pub fn text_within(&self, area: &PdfRect) -> String {
        self.words
            .iter()
            .filter(|w| area.contains(&w.rect))
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Consecutive words share a line when their vertical extents overlap.
fn same_line(a: &PdfRect, b: &PdfRect) -> bool {
    b.top < a.bottom && a.top < b.bottom
}

/// Occurrences of `needle` within the space-joined text of `line`.
fn line_matches(line: &[Word], needle: &str) -> Vec<PdfRect> {
    let mut text = String::new();
    let mut spans = Vec::with_capacity(line.len());
    for word in line {
        if !text.is_empty() {
            text.push(' ');
        }
        let start = text.len();
        text.push_str(&word.text);
        spans.push(start..text.len());
    }

    text.match_indices(needle)
        .map(|(start, matched)| {
            let end = start + matched.len();
            PdfRect::union_all(
                line.iter()
                    .zip(&spans)
                    .filter(|(_, span)| span.start < end && start < span.end)
                    .map(|(word, _)| &word.rect),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn page() -> PageWords {
        PageWords {
            index: 0,
            words: vec![
                Word::new("NOUVEAU", PdfRect::new(10.0, 100.0, 60.0, 110.0)),
                Word::new("SOLDE", PdfRect::new(62.0, 100.0, 90.0, 110.0)),
                Word::new("CREDITEUR", PdfRect::new(92.0, 100.0, 140.0, 110.0)),
                Word::new("NOUVEAU", PdfRect::new(10.0, 200.0, 60.0, 210.0)),
                Word::new("SOLDE", PdfRect::new(10.0, 220.0, 40.0, 230.0)),
                Word::new("Date", PdfRect::new(10.0, 300.0, 30.0, 310.0)),
            ],
        }
    }

    #[gtest]
    fn test_find_word_rects_is_exact_and_case_sensitive() {
        let page = page();
        expect_that!(
            page.find_word_rects("Date"),
            elements_are![eq(&PdfRect::new(10.0, 300.0, 30.0, 310.0))]
        );
        expect_that!(page.find_word_rects("date"), is_empty());
        expect_that!(page.find_word_rects("Dat"), is_empty());
    }

    #[gtest]
    fn test_search_text_finds_phrase_on_one_line_only() {
        // The second NOUVEAU/SOLDE pair is split over two lines.
        expect_that!(
            page().search_text("NOUVEAU SOLDE"),
            elements_are![eq(&PdfRect::new(10.0, 100.0, 90.0, 110.0))]
        );
    }

    #[gtest]
    fn test_search_text_matches_words_with_attached_punctuation() {
        let page = PageWords {
            index: 0,
            words: vec![
                Word::new("NOUVEAU", PdfRect::new(10.0, 100.0, 60.0, 110.0)),
                Word::new("SOLDE:", PdfRect::new(62.0, 100.0, 96.0, 110.0)),
                Word::new("Prévoyance,", PdfRect::new(98.0, 100.0, 160.0, 110.0)),
            ],
        };

        expect_that!(
            page.search_text("NOUVEAU SOLDE"),
            elements_are![eq(&PdfRect::new(10.0, 100.0, 96.0, 110.0))]
        );
        expect_that!(
            page.search_text("Prévoyance"),
            elements_are![eq(&PdfRect::new(98.0, 100.0, 160.0, 110.0))]
        );
    }

    #[gtest]
    fn test_search_text_finds_every_occurrence_in_reading_order() {
        let page = PageWords {
            index: 0,
            words: vec![
                Word::new("Perte", PdfRect::new(10.0, 100.0, 40.0, 110.0)),
                Word::new("ou", PdfRect::new(42.0, 100.0, 54.0, 110.0)),
                Word::new("vol", PdfRect::new(56.0, 100.0, 74.0, 110.0)),
                Word::new("Perte", PdfRect::new(10.0, 300.0, 40.0, 310.0)),
                Word::new("ou", PdfRect::new(42.0, 300.0, 54.0, 310.0)),
                Word::new("vol.", PdfRect::new(56.0, 300.0, 78.0, 310.0)),
            ],
        };

        expect_that!(
            page.search_text("Perte  ou vol"),
            elements_are![
                eq(&PdfRect::new(10.0, 100.0, 74.0, 110.0)),
                eq(&PdfRect::new(10.0, 300.0, 78.0, 310.0)),
            ]
        );
    }

    #[gtest]
    fn test_search_text_without_match() {
        expect_that!(page().search_text("Perte ou vol"), is_empty());
        expect_that!(page().search_text(""), is_empty());
    }

    #[gtest]
    fn test_text_within_joins_contained_words() {
        expect_that!(
            page().text_within(&PdfRect::new(5.0, 95.0, 100.0, 115.0)),
            eq("NOUVEAU SOLDE")
        );
    }
}
