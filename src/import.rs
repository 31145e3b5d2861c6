//! CSV seeding for the customer store

use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::ledger::{CustomerDirectory, LedgerError};
use crate::model::Customer;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// One row of a customer seed file.
///
/// Expected header: `customer_id,account_number,name,balance[,contact,address]`
#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer_id: u32,
    account_number: u32,
    name: String,
    balance: i64,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    address: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            customer_id: row.customer_id,
            account_number: row.account_number,
            name: row.name,
            balance: row.balance,
            loan_requested: false,
            loan_amount: 0,
            loan_approved: false,
            password_hash: String::new(),
            online: false,
            active: true,
            contact: row.contact,
            address: row.address,
        }
    }
}

/// Seed the customer store from a headered CSV file, returning the number
/// of rows imported.
///
/// Every row goes through [`CustomerDirectory::register`], so a duplicate
/// id or account number fails the import at that row, with earlier rows
/// already stored.
pub fn import_customers(
    directory: &CustomerDirectory,
    path: impl AsRef<Path>,
) -> ImportResult<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut imported = 0;
    for row in reader.deserialize::<CustomerRow>() {
        let customer = Customer::from(row?);
        directory.register(&customer)?;
        imported += 1;
    }
    info!(imported, path = %path.as_ref().display(), "customer seed loaded");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_directory() -> (TempDir, CustomerDirectory) {
        let temp_dir = TempDir::new().unwrap();
        let directory = CustomerDirectory::open(temp_dir.path().join("customers.dat")).unwrap();
        (temp_dir, directory)
    }

    #[test]
    fn test_import_seeds_directory() {
        let (temp_dir, directory) = setup_directory();
        let seed = temp_dir.path().join("seed.csv");
        fs::write(
            &seed,
            "customer_id,account_number,name,balance,contact,address\n\
             7, 9007, Asha Rao, 1000, 555-0100, 1 Bank Street\n\
             8, 9008, Bo Lindqvist, -250, ,\n",
        )
        .unwrap();

        assert_eq!(import_customers(&directory, &seed).unwrap(), 2);
        assert_eq!(directory.resolve_balance(7).unwrap(), 1_000);
        assert_eq!(directory.resolve_balance(8).unwrap(), -250);

        let (_, asha) = directory.lookup(7).unwrap();
        assert_eq!(asha.name, "Asha Rao");
        assert_eq!(asha.contact, "555-0100");
        assert!(asha.active);
        assert!(!asha.online);
    }

    #[test]
    fn test_import_without_optional_columns() {
        let (temp_dir, directory) = setup_directory();
        let seed = temp_dir.path().join("seed.csv");
        fs::write(
            &seed,
            "customer_id,account_number,name,balance\n1,9001,Mira Chen,500\n",
        )
        .unwrap();

        assert_eq!(import_customers(&directory, &seed).unwrap(), 1);
        let (_, mira) = directory.lookup(1).unwrap();
        assert_eq!(mira.contact, "");
        assert_eq!(mira.address, "");
    }

    #[test]
    fn test_import_stops_on_duplicate_row() {
        let (temp_dir, directory) = setup_directory();
        let seed = temp_dir.path().join("seed.csv");
        fs::write(
            &seed,
            "customer_id,account_number,name,balance\n\
             1,9001,Mira Chen,500\n\
             1,9002,Duplicate,0\n\
             2,9003,Never Reached,0\n",
        )
        .unwrap();

        let err = import_customers(&directory, &seed).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Ledger(LedgerError::DuplicateCustomer { customer_id: 1, .. })
        ));
        // The row before the duplicate is already stored
        assert_eq!(directory.store().len().unwrap(), 1);
    }

    #[test]
    fn test_import_rejects_malformed_amounts() {
        let (temp_dir, directory) = setup_directory();
        let seed = temp_dir.path().join("seed.csv");
        fs::write(
            &seed,
            "customer_id,account_number,name,balance\n1,9001,Mira Chen,lots\n",
        )
        .unwrap();

        assert!(matches!(
            import_customers(&directory, &seed).unwrap_err(),
            ImportError::Csv(_)
        ));
    }
}
