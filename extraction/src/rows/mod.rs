//! Rebuilds logical transactions from statement table rows.
//!
//! A transaction starts on a row carrying a date and exactly one amount. Its description may wrap
//! onto following rows which carry neither date nor amount.


use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::{error::MalformedInput, normalize::StatementCells};

/// Date cell text of a header row repeated at the top of a continued table.
const HEADER_DATE: &str = "date";

/// A transaction read from a statement, with its date not yet resolved to a calendar date.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatementRow {
    /// `day/month` text as printed on the statement.
    pub date: String,
    pub description: String,
    /// Credits are positive, debits negative.
    pub value: Decimal,
}

/// Reconstructs the transactions of a table, in table order.
pub fn reconstruct(rows: &[StatementCells]) -> Result<Vec<StatementRow>> {
    let finished = rows
        .iter()
        .enumerate()
        .try_fold(Reconstruction::default(), |acc, (index, row)| {
            acc.step(row)
                .with_context(|| format!("reconstructing table row index {index}"))
        })?;
    Ok(finished.finish())
}

/// Accumulator of [reconstruct]: the finished transactions and the one still open to
/// continuation rows.
#[derive(Default)]
struct Reconstruction {
    done: Vec<StatementRow>,
    open: Option<StatementRow>,
}

impl Reconstruction {
    fn step(mut self, row: &StatementCells) -> Result<Self> {
        let Some(description) = row.description.as_deref() else {
            // Blank filler row.
            return Ok(self);
        };

        let Some(date) = row.date.as_deref() else {
            self.continue_open(description, row);
            return Ok(self);
        };

        if date.trim().to_lowercase() == HEADER_DATE {
            log::debug!("Skipping repeated table header row.");
            return Ok(self);
        }

        let value = signed_value(row.debit.as_deref(), row.credit.as_deref())?;
        self.done.extend(self.open.take());
        self.open = Some(StatementRow {
            date: date.to_string(),
            description: description.to_string(),
            value,
        });
        Ok(self)
    }

    fn continue_open(&mut self, description: &str, row: &StatementCells) {
        let Some(open) = self.open.as_mut() else {
            log::debug!("Skipping text before the first transaction: {:?}.", description);
            return;
        };
        if row.debit.is_some() || row.credit.is_some() {
            log::debug!(
                "Skipping continuation row carrying an amount: {:?}.",
                description
            );
            return;
        }
        open.description.push('\n');
        open.description.push_str(description);
    }

    fn finish(mut self) -> Vec<StatementRow> {
        self.done.extend(self.open.take());
        self.done
    }
}

/// Signed value of a transaction from its debit and credit cells. A debit takes precedence over
/// a credit on the same row.
fn signed_value(debit: Option<&str>, credit: Option<&str>) -> Result<Decimal> {
    match (debit, credit) {
        (Some(debit), _) => parse_amount(debit).map(|value| -value),
        (None, Some(credit)) => parse_amount(credit),
        (None, None) => Err(MalformedInput::NoAmount.into()),
    }
}

/// Parses an amount printed with a decimal comma and space-separated thousands, such as
/// `1 234,56`.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let normalised: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&normalised)
        .map_err(|_| MalformedInput::UnparseableAmount)
        .with_context(|| format!("parsing amount {:?}", text))
}
