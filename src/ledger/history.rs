use super::error::LedgerResult;
use super::logger::TransactionLedger;
use crate::model::{CustomerId, Transaction};
use crate::store::ScanIter;

impl TransactionLedger {
    /// Lazily iterate `subject`'s ledger entries, oldest first.
    ///
    /// The full ledger is shared by all subjects, so this filters a plain
    /// scan; nothing is read until the iterator is advanced, and an unknown
    /// subject simply yields an empty sequence. Restartable by calling
    /// again.
    pub fn history_for(&self, subject: CustomerId) -> HistoryIter<'_> {
        HistoryIter {
            scan: self.store().scan(),
            subject,
        }
    }
}

/// Lazy iterator over one subject's ledger entries
pub struct HistoryIter<'a> {
    scan: ScanIter<'a, Transaction>,
    subject: CustomerId,
}

impl Iterator for HistoryIter<'_> {
    type Item = LedgerResult<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.scan.next()? {
                Ok((_, entry)) if entry.subject_id == self.subject => return Some(Ok(entry)),
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_ledger() -> (TempDir, TransactionLedger) {
        let temp_dir = TempDir::new().unwrap();
        let ledger = TransactionLedger::open(temp_dir.path().join("ledger.dat")).unwrap();
        (temp_dir, ledger)
    }

    #[test]
    fn test_history_filters_by_subject() {
        let (_temp, ledger) = setup_ledger();
        ledger.log_with_balance(7, 100, "deposit", 100).unwrap();
        ledger.log_with_balance(9, 500, "deposit", 500).unwrap();
        ledger.log_with_balance(7, -30, "withdrawal", 70).unwrap();

        let entries: Vec<Transaction> = ledger
            .history_for(7)
            .collect::<LedgerResult<Vec<_>>>()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.subject_id == 7));
        assert_eq!(entries[0].description, "deposit: 100");
        assert_eq!(entries[1].description, "withdrawal: -30");
    }

    #[test]
    fn test_history_for_unknown_subject_is_empty() {
        let (_temp, ledger) = setup_ledger();
        ledger.log_with_balance(7, 100, "deposit", 100).unwrap();
        assert_eq!(ledger.history_for(999).count(), 0);
    }

    #[test]
    fn test_history_on_empty_ledger() {
        let (_temp, ledger) = setup_ledger();
        assert_eq!(ledger.history_for(1).count(), 0);
    }

    #[test]
    fn test_history_restartable() {
        let (_temp, ledger) = setup_ledger();
        ledger.log_with_balance(7, 100, "deposit", 100).unwrap();
        ledger.log_with_balance(7, 200, "deposit", 300).unwrap();

        assert_eq!(ledger.history_for(7).count(), 2);
        assert_eq!(ledger.history_for(7).count(), 2);
    }
}
