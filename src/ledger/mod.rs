//! Customer balances and the transaction audit ledger

mod balance;
mod error;
mod history;
mod logger;
#[cfg(test)]
mod tests;

pub use balance::CustomerDirectory;
pub use error::{LedgerError, LedgerResult};
pub use history::HistoryIter;
pub use logger::TransactionLedger;
