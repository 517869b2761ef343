//! Builders for synthetic statement pages used by tests.

use crate::{
    geom::PdfRect,
    locate::{PageWords, Word},
    table::Table,
};

/// Left edges of the header words drawn by [PageBuilder::table_header].
pub const DATE_LEFT: f32 = 40.0;
pub const DESCRIPTION_LEFT: f32 = 100.0;
pub const DEBIT_LEFT: f32 = 400.0;
pub const CREDIT_LEFT: f32 = 480.0;

/// Height of every synthetic word.
pub const WORD_HEIGHT: f32 = 10.0;

const CHAR_WIDTH: f32 = 6.0;
const SPACE_WIDTH: f32 = 4.0;

pub struct PageBuilder {
    index: usize,
    words: Vec<Word>,
}

impl PageBuilder {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            words: Vec::new(),
        }
    }

    /// Adds the words of `phrase` on one line, starting at (`left`, `top`).
    pub fn phrase(mut self, phrase: &str, left: f32, top: f32) -> Self {
        let mut x = left;
        for token in phrase.split_whitespace() {
            let width = token.chars().count() as f32 * CHAR_WIDTH;
            self.words.push(Word::new(
                token,
                PdfRect::new(x, top, x + width, top + WORD_HEIGHT),
            ));
            x += width + SPACE_WIDTH;
        }
        self
    }

    /// Adds an account label line and, 20pt below it, the four column headers with their top at
    /// `top`.
    pub fn table_header(self, top: f32, account_label: &str) -> Self {
        self.phrase(account_label, DATE_LEFT, top - 20.0)
            .phrase("Date", DATE_LEFT, top)
            .phrase("Détail des opérations", DESCRIPTION_LEFT, top)
            .phrase("Débit", DEBIT_LEFT, top)
            .phrase("Crédit", CREDIT_LEFT, top)
    }

    /// Adds the hard end phrase with its top at `top`.
    pub fn hard_end(self, top: f32) -> Self {
        self.phrase("NOUVEAU SOLDE CREDITEUR", DATE_LEFT, top)
    }

    /// Adds a soft end phrase with its top at `top`.
    pub fn soft_end(self, top: f32) -> Self {
        self.phrase("Perte ou vol de votre carte", DATE_LEFT, top)
    }

    pub fn build(self) -> PageWords {
        PageWords {
            index: self.index,
            words: self.words,
        }
    }
}

/// Builds a [Table] from string literals, where `""` is a blank cell.
pub fn table(rows: &[&[&str]]) -> Table {
    rows.iter().map(|row| row.iter().copied()).into()
}
