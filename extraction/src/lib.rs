//! Extraction of transactions from Caisse d'Epargne PDF bank statements.
//!
//! The pipeline locates each statement table from its header and footer words, extracts the raw
//! cells of every table region, and rebuilds dated, signed transactions per account. See
//! [process::StatementProcessor].

pub mod archive;
pub mod dates;
pub mod error;
pub mod geom;
pub mod layout;
pub mod locate;
pub mod normalize;
pub mod process;
pub mod regions;
pub mod rows;
pub mod segment;
pub mod table;
pub mod tabula_wrapper;

#[cfg(test)]
mod testutil;
