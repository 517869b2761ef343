use std::ops::{Deref, DerefMut};

/// A single cell of a raw grid. Blank text is represented as `None`.
pub type Cell = Option<String>;

/// Raw grid of cells as produced by the cell extractor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table(pub Vec<Row>);

impl Table {
    /// Number of columns, i.e. the length of the longest row.
    pub fn num_columns(&self) -> usize {
        self.iter().map(|row| row.len()).max().unwrap_or(0)
    }
}

impl Deref for Table {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, R> From<C> for Table
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        Table(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(pub Vec<Cell>);

impl Row {
    /// Returns the cell at `index`, treating cells beyond the end of a short row as blank.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(Option::as_deref)
    }
}

impl Deref for Row {
    type Target = Vec<Cell>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(|s| cell_from_text(s.into())).collect())
    }
}

/// Converts extracted text into a [Cell], where whitespace-only text is blank.
pub fn cell_from_text(text: String) -> Cell {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
