/// Violation of the fixed statement layout. Processing of the affected document cannot continue.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MalformedInput {
    #[error("table does not have enough columns (found {found}, need 4)")]
    TooFewColumns { found: usize },
    #[error("no account number found above the table header on page index {page}")]
    NoAccountNumber { page: usize },
    #[error("table on page index {page} has no matching end on the same page")]
    NoTableEnd { page: usize },
    #[error("no debit nor credit on date line")]
    NoAmount,
    #[error("amount is not a decimal number")]
    UnparseableAmount,
    #[error("date is not in day/month form")]
    UnparseableDate,
    #[error("date does not exist in the calendar")]
    InvalidDate,
    #[error("document name does not contain the statement year and month")]
    NoStatementPeriod,
}
