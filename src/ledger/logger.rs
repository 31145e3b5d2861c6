use std::path::Path;

use chrono::Local;
use tracing::info;

use super::balance::CustomerDirectory;
use super::error::LedgerResult;
use crate::model::{CustomerId, Transaction};
use crate::store::{LockWait, RecordStore};

/// Timestamp pattern shared by every ledger entry
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format the current local wall-clock time for a ledger entry
fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Append-only ledger of operations against customer accounts.
///
/// Entries are only ever appended, so file order is logging order and a
/// subject's history reads oldest-first. An append that fails part-way may
/// leave a torn tail block; the store absorbs it on the next append, but a
/// caller must not blindly retry a failed log, since a retry after an
/// ambiguous failure can duplicate the entry.
pub struct TransactionLedger {
    store: RecordStore<Transaction>,
}

impl TransactionLedger {
    /// Open the ledger at `path`, creating it on first use
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        Ok(Self {
            store: RecordStore::open(path)?,
        })
    }

    /// Open with an explicit lock-wait policy for appends
    pub fn open_with(path: impl AsRef<Path>, lock_wait: LockWait) -> LedgerResult<Self> {
        Ok(Self {
            store: RecordStore::open_with(path, lock_wait)?,
        })
    }

    /// Get the underlying record store
    pub fn store(&self) -> &RecordStore<Transaction> {
        &self.store
    }

    /// Record one operation against `subject`, snapshotting the subject's
    /// balance from the directory at call time.
    ///
    /// Logged before the caller applies its balance change, the entry
    /// carries the pre-operation balance; callers that want the posted
    /// balance apply first and use [`TransactionLedger::log_with_balance`].
    /// Nothing is appended when the subject is unknown.
    pub fn log(
        &self,
        customers: &CustomerDirectory,
        subject: CustomerId,
        amount: i64,
        label: &str,
    ) -> LedgerResult<Transaction> {
        let balance = customers.resolve_balance(subject)?;
        self.log_with_balance(subject, amount, label, balance)
    }

    /// Record one operation with the balance snapshot supplied by the
    /// caller, typically the balance it just finished posting
    pub fn log_with_balance(
        &self,
        subject: CustomerId,
        amount: i64,
        label: &str,
        balance: i64,
    ) -> LedgerResult<Transaction> {
        let entry = Transaction {
            subject_id: subject,
            description: format!("{label}: {amount}"),
            timestamp: current_timestamp(),
            balance,
        };
        let pos = self.store.append(&entry)?;
        info!(subject, position = pos, label, "transaction logged");
        Ok(entry)
    }
}
