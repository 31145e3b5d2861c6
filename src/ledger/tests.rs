use super::*;
use crate::model::{Customer, CustomerId, Transaction};
use std::thread;
use tempfile::TempDir;

fn customer(id: CustomerId, balance: i64) -> Customer {
    Customer {
        customer_id: id,
        account_number: 9000 + id,
        name: format!("customer {id}"),
        balance,
        loan_requested: false,
        loan_amount: 0,
        loan_approved: false,
        password_hash: String::new(),
        online: false,
        active: true,
        contact: String::new(),
        address: String::new(),
    }
}

fn setup_bank() -> (TempDir, CustomerDirectory, TransactionLedger) {
    let temp_dir = TempDir::new().unwrap();
    let directory = CustomerDirectory::open(temp_dir.path().join("customers.dat")).unwrap();
    let ledger = TransactionLedger::open(temp_dir.path().join("ledger.dat")).unwrap();
    (temp_dir, directory, ledger)
}

#[test]
fn test_deposit_logged_and_visible_in_history() {
    let (_temp, directory, ledger) = setup_bank();
    directory.register(&customer(7, 1_000)).unwrap();

    ledger.log(&directory, 7, 200, "deposit").unwrap();

    let entries: Vec<Transaction> = ledger
        .history_for(7)
        .collect::<LedgerResult<Vec<_>>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].subject_id, 7);
    assert!(entries[0].description.contains("deposit: 200"));
    assert_eq!(entries[0].balance, 1_000);

    let err = directory.resolve_balance(999).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownSubject(999)));
}

#[test]
fn test_log_for_unknown_subject_writes_nothing() {
    let (_temp, directory, ledger) = setup_bank();
    directory.register(&customer(7, 1_000)).unwrap();

    let err = ledger.log(&directory, 999, 50, "deposit").unwrap_err();
    assert!(matches!(err, LedgerError::UnknownSubject(999)));
    assert_eq!(ledger.store().len().unwrap(), 0);
    assert_eq!(ledger.history_for(999).count(), 0);
}

#[test]
fn test_apply_then_log_posted_balance() {
    let (_temp, directory, ledger) = setup_bank();
    directory.register(&customer(7, 1_000)).unwrap();

    // A caller posts the deposit first, then logs the balance it wrote
    let (pos, mut record) = directory.lookup(7).unwrap();
    record.balance += 200;
    directory.overwrite(pos, &record).unwrap();
    ledger
        .log_with_balance(7, 200, "deposit", record.balance)
        .unwrap();

    let entries: Vec<Transaction> = ledger
        .history_for(7)
        .collect::<LedgerResult<Vec<_>>>()
        .unwrap();
    assert_eq!(entries[0].balance, 1_200);
    assert_eq!(directory.resolve_balance(7).unwrap(), 1_200);
}

#[test]
fn test_histories_stay_separate_per_subject() {
    let (_temp, directory, ledger) = setup_bank();
    directory.register(&customer(1, 100)).unwrap();
    directory.register(&customer(2, 200)).unwrap();

    ledger.log(&directory, 1, 10, "deposit").unwrap();
    ledger.log(&directory, 2, 20, "deposit").unwrap();
    ledger.log(&directory, 1, -5, "withdrawal").unwrap();

    let first: Vec<Transaction> = ledger
        .history_for(1)
        .collect::<LedgerResult<Vec<_>>>()
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].description, "deposit: 10");
    assert_eq!(first[1].description, "withdrawal: -5");

    let second: Vec<Transaction> = ledger
        .history_for(2)
        .collect::<LedgerResult<Vec<_>>>()
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].description, "deposit: 20");
}

#[test]
fn test_concurrent_loggers_keep_ledger_intact() {
    let (temp_dir, directory, ledger) = setup_bank();
    directory.register(&customer(7, 1_000)).unwrap();

    const LOGGERS: u32 = 6;
    const PER_LOGGER: u32 = 20;

    let handles: Vec<_> = (0..LOGGERS)
        .map(|worker| {
            let dir_path = temp_dir.path().join("customers.dat");
            let ledger_path = temp_dir.path().join("ledger.dat");
            thread::spawn(move || {
                let own_directory = CustomerDirectory::open(&dir_path).unwrap();
                let own_ledger = TransactionLedger::open(&ledger_path).unwrap();
                for seq in 0..PER_LOGGER {
                    own_ledger
                        .log(&own_directory, 7, seq as i64, &format!("op{worker}"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries: Vec<Transaction> = ledger
        .history_for(7)
        .collect::<LedgerResult<Vec<_>>>()
        .unwrap();
    assert_eq!(entries.len(), (LOGGERS * PER_LOGGER) as usize);

    // No torn or interleaved record: every entry decodes with the snapshot
    // balance and a well-formed description
    let mut per_worker = vec![0u32; LOGGERS as usize];
    for entry in &entries {
        assert_eq!(entry.balance, 1_000);
        let (label, amount) = entry.description.split_once(": ").unwrap();
        let worker: usize = label.strip_prefix("op").unwrap().parse().unwrap();
        let _: i64 = amount.parse().unwrap();
        per_worker[worker] += 1;
    }
    assert!(per_worker.iter().all(|&count| count == PER_LOGGER));
}
