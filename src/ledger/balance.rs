use std::path::Path;

use regex::Regex;
use tracing::info;

use super::error::{LedgerError, LedgerResult};
use crate::model::{Customer, CustomerId};
use crate::store::{LockWait, RecordPos, RecordStore, ScanIter};

/// Read-mostly view of the customer store.
///
/// The resolver side of this type is deliberately silent: `resolve_balance`
/// never writes and produces no user-facing output, so it composes into the
/// transaction logger. Anything shown to a person (a "view balance" screen,
/// an error message) belongs to the caller, formatted on top of the value
/// or error returned here.
pub struct CustomerDirectory {
    store: RecordStore<Customer>,
}

impl CustomerDirectory {
    /// Open the customer store at `path`, creating it on first use
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        Ok(Self {
            store: RecordStore::open(path)?,
        })
    }

    /// Open with an explicit lock-wait policy for writes
    pub fn open_with(path: impl AsRef<Path>, lock_wait: LockWait) -> LedgerResult<Self> {
        Ok(Self {
            store: RecordStore::open_with(path, lock_wait)?,
        })
    }

    /// Get the underlying record store
    pub fn store(&self) -> &RecordStore<Customer> {
        &self.store
    }

    /// Get the current balance for `id`, in minor currency units.
    ///
    /// Fails with `UnknownSubject` when no customer record carries the id.
    pub fn resolve_balance(&self, id: CustomerId) -> LedgerResult<i64> {
        match self.store.find(|c| c.customer_id == id)? {
            Some((_, customer)) => Ok(customer.balance),
            None => Err(LedgerError::UnknownSubject(id)),
        }
    }

    /// Get the customer record for `id` with its store position
    pub fn lookup(&self, id: CustomerId) -> LedgerResult<(RecordPos, Customer)> {
        self.store
            .find(|c| c.customer_id == id)?
            .ok_or(LedgerError::UnknownSubject(id))
    }

    /// Find every customer whose name matches the regex, in file order
    pub fn find_by_name(&self, pattern: &str) -> LedgerResult<Vec<(RecordPos, Customer)>> {
        let re = Regex::new(pattern)?;
        let mut matches = Vec::new();
        for entry in self.store.scan() {
            let (pos, customer) = entry?;
            if re.is_match(&customer.name) {
                matches.push((pos, customer));
            }
        }
        Ok(matches)
    }

    /// Lazily iterate every customer record
    pub fn scan(&self) -> ScanIter<'_, Customer> {
        self.store.scan()
    }

    /// Append a new customer after checking `customer_id` and
    /// `account_number` against every existing record.
    ///
    /// The check and the append run under one exclusive whole-file lock, so
    /// two registrars racing on the same id cannot both pass the check.
    pub fn register(&self, customer: &Customer) -> LedgerResult<RecordPos> {
        let guard = self.store.exclusive()?;
        if let Some((_, existing)) = guard.find(|c| {
            c.customer_id == customer.customer_id
                || c.account_number == customer.account_number
        })? {
            return Err(LedgerError::DuplicateCustomer {
                customer_id: existing.customer_id,
                account_number: existing.account_number,
            });
        }
        let pos = guard.append(customer)?;
        info!(
            customer_id = customer.customer_id,
            position = pos,
            "customer registered"
        );
        Ok(pos)
    }

    /// Overwrite the customer record at a previously observed position.
    ///
    /// This is the mutation hook for callers that change account state;
    /// the directory itself never computes new balances.
    pub fn overwrite(&self, pos: RecordPos, customer: &Customer) -> LedgerResult<()> {
        self.store.update_at(pos, customer)?;
        Ok(())
    }
}
