//! Calendar dates of statement rows, which print only day and month.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lazy_regex::regex_captures;

use crate::error::MalformedInput;

/// Year and month a statement was issued in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatementPeriod {
    pub year: i32,
    pub month: u32,
}

impl StatementPeriod {
    /// Parses the period from a statement file name such as
    /// `RELEVES_12345678901_20230603.pdf`.
    pub fn from_document_name(name: &str) -> Result<Self> {
        let (_, year, month) = regex_captures!(r"RELEVES_.+?_([0-9]{4})([0-9]{2})[0-9]{2}", name)
            .ok_or(MalformedInput::NoStatementPeriod)
            .with_context(|| format!("reading statement period from {:?}", name))?;
        Ok(Self {
            // Both captures are plain digit runs.
            year: year.parse().map_err(|_| MalformedInput::NoStatementPeriod)?,
            month: month.parse().map_err(|_| MalformedInput::NoStatementPeriod)?,
        })
    }

    pub fn resolve(&self, day_month: &str) -> Result<NaiveDate> {
        resolve(self.year, self.month, day_month)
    }
}

/// Resolves a `day/month` date printed on a statement issued in `year`/`month`.
///
/// A January statement lists December transactions, which belong to the previous year.
pub fn resolve(year: i32, month: u32, day_month: &str) -> Result<NaiveDate> {
    let (_, day, row_month) = regex_captures!(r"^([0-9]{1,2})/([0-9]{1,2})$", day_month.trim())
        .ok_or(MalformedInput::UnparseableDate)
        .with_context(|| format!("parsing date {:?}", day_month))?;
    let day: u32 = day.parse().map_err(|_| MalformedInput::UnparseableDate)?;
    let row_month: u32 = row_month
        .parse()
        .map_err(|_| MalformedInput::UnparseableDate)?;

    let row_year = if month == 1 && row_month == 12 {
        year - 1
    } else {
        year
    };

    NaiveDate::from_ymd_opt(row_year, row_month, day)
        .ok_or(MalformedInput::InvalidDate)
        .with_context(|| format!("resolving date {:?} in year {}", day_month, row_year))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use test_casing::{TestCases, cases, test_casing};
    use testutils::anyhow_downcasts_to;

    use super::*;

    #[derive(Debug)]
    struct ResolveCase {
        year: i32,
        month: u32,
        day_month: &'static str,
        expect: (i32, u32, u32),
    }

    const RESOLVE_CASES: TestCases<ResolveCase> = cases! {
        [
            // December rows of a January statement are from the previous year.
            ResolveCase { year: 2023, month: 1, day_month: "15/12", expect: (2022, 12, 15) },
            ResolveCase { year: 2023, month: 6, day_month: "03/06", expect: (2023, 6, 3) },
            ResolveCase { year: 2023, month: 1, day_month: "02/01", expect: (2023, 1, 2) },
            ResolveCase { year: 2023, month: 12, day_month: "31/12", expect: (2023, 12, 31) },
            ResolveCase { year: 2023, month: 3, day_month: "28/02", expect: (2023, 2, 28) },
            ResolveCase { year: 2024, month: 3, day_month: " 29/02 ", expect: (2024, 2, 29) },
        ]
    };

    #[test]
    fn test_resolve_cases() {
        assert_eq!(6, RESOLVE_CASES.into_iter().count());
    }

    #[test_casing(6, RESOLVE_CASES)]
    #[gtest]
    fn test_resolve(test_case: ResolveCase) -> anyhow::Result<()> {
        let (year, month, day) = test_case.expect;
        let expected = NaiveDate::from_ymd_opt(year, month, day).expect("valid expected date");
        expect_that!(
            resolve(test_case.year, test_case.month, test_case.day_month)?,
            eq(expected)
        );
        Ok(())
    }

    #[gtest]
    fn test_resolve_unparseable() {
        for text in ["", "15-12", "15/12/2023", "quinze/12"] {
            expect_that!(
                resolve(2023, 6, text),
                err(anyhow_downcasts_to::<MalformedInput, _>(eq(
                    MalformedInput::UnparseableDate
                ))),
                "for {:?}",
                text
            );
        }
    }

    #[gtest]
    fn test_resolve_impossible_date() {
        for text in ["30/02", "29/02", "00/06", "12/13"] {
            expect_that!(
                resolve(2023, 6, text),
                err(anyhow_downcasts_to::<MalformedInput, _>(eq(
                    MalformedInput::InvalidDate
                ))),
                "for {:?}",
                text
            );
        }
    }

    #[gtest]
    fn test_period_from_document_name() -> anyhow::Result<()> {
        expect_that!(
            StatementPeriod::from_document_name("RELEVES_12345678901_20230603.pdf")?,
            eq(StatementPeriod {
                year: 2023,
                month: 6
            })
        );
        expect_that!(
            StatementPeriod::from_document_name("/tmp/2023/RELEVES_CPT_X_20240105_1.pdf")?,
            eq(StatementPeriod {
                year: 2024,
                month: 1
            })
        );
        Ok(())
    }

    #[gtest]
    fn test_period_missing_from_name() {
        expect_that!(
            StatementPeriod::from_document_name("statement.pdf"),
            err(anyhow_downcasts_to::<MalformedInput, _>(eq(
                MalformedInput::NoStatementPeriod
            )))
        );
    }

    #[gtest]
    fn test_period_resolves_rows() -> anyhow::Result<()> {
        let period = StatementPeriod::from_document_name("RELEVES_1_20230110.pdf")?;
        expect_that!(
            period.resolve("28/12")?,
            eq(NaiveDate::from_ymd_opt(2022, 12, 28).expect("valid date"))
        );
        Ok(())
    }
}
