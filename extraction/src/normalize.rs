use anyhow::Result;

use crate::{
    error::MalformedInput,
    table::{Cell, Table},
};

/// Number of semantic columns of a statement table.
pub const NUM_COLUMNS: usize = 4;

/// A row of a statement table after column normalisation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatementCells {
    pub date: Cell,
    pub description: Cell,
    pub debit: Cell,
    pub credit: Cell,
}

/// Coerces a raw grid into the four statement columns.
///
/// Columns between the description and the last two (debit, credit) are text the cell extractor
/// split off the description; they are joined back onto it, one per line.
///
/// A grid without any rows normalises to no rows.
pub fn fix(table: Table) -> Result<Vec<StatementCells>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let num_columns = table.num_columns();
    if num_columns < NUM_COLUMNS {
        return Err(MalformedInput::TooFewColumns { found: num_columns }.into());
    }

    let debit_index = num_columns - 2;
    let credit_index = num_columns - 1;

    Ok(table
        .0
        .into_iter()
        .map(|row| StatementCells {
            date: row.cell(0).map(str::to_string),
            description: join_description(
                row.get(1..debit_index.min(row.len())).unwrap_or_default(),
            ),
            debit: row.cell(debit_index).map(str::to_string),
            credit: row.cell(credit_index).map(str::to_string),
        })
        .collect())
}

/// Joins description fragments with newlines, where a missing fragment is an empty line.
fn join_description(parts: &[Cell]) -> Cell {
    if parts.iter().all(Option::is_none) {
        return None;
    }
    Some(
        parts
            .iter()
            .map(|part| part.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
