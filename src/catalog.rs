//! Named store files of one bank data directory

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::ledger::{CustomerDirectory, LedgerResult, TransactionLedger};
use crate::model::{Employee, Feedback, Loan, Official};
use crate::store::{RecordStore, StoreResult};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// File names of the record stores inside a bank data directory.
///
/// Persisted as `catalog.json` next to the stores, so a deployment can
/// rename or pre-seed files without recompiling. Every store is opened
/// through these names; nothing in the crate hard-codes a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankCatalog {
    pub customers: String,
    pub transactions: String,
    pub loans: String,
    pub feedback: String,
    pub employees: String,
    pub managers: String,
    pub admins: String,
}

impl Default for BankCatalog {
    fn default() -> Self {
        Self {
            customers: "customers.dat".to_string(),
            transactions: "transactions.dat".to_string(),
            loans: "loans.dat".to_string(),
            feedback: "feedback.dat".to_string(),
            employees: "employees.dat".to_string(),
            managers: "managers.dat".to_string(),
            admins: "admins.dat".to_string(),
        }
    }
}

impl BankCatalog {
    /// Load `catalog.json` from the data directory
    pub fn load(dir: &Path) -> CatalogResult<Self> {
        let catalog_path = dir.join("catalog.json");
        let content = fs::read_to_string(&catalog_path)?;
        let catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Load `catalog.json` if present, falling back to the default names
    pub fn load_or_default(dir: &Path) -> CatalogResult<Self> {
        if dir.join("catalog.json").exists() {
            Self::load(dir)
        } else {
            debug!(dir = %dir.display(), "no catalog.json, using default store names");
            Ok(Self::default())
        }
    }

    /// Save `catalog.json` into the data directory, creating it if needed
    pub fn save(&self, dir: &Path) -> CatalogResult<()> {
        fs::create_dir_all(dir)?;
        let catalog_path = dir.join("catalog.json");
        let content = serde_json::to_string_pretty(&self)?;
        fs::write(&catalog_path, content)?;
        Ok(())
    }

    /// Open the customer directory of this catalog
    pub fn open_customers(&self, dir: &Path) -> LedgerResult<CustomerDirectory> {
        CustomerDirectory::open(dir.join(&self.customers))
    }

    /// Open the transaction ledger of this catalog
    pub fn open_transactions(&self, dir: &Path) -> LedgerResult<TransactionLedger> {
        TransactionLedger::open(dir.join(&self.transactions))
    }

    /// Open the loan application store
    pub fn open_loans(&self, dir: &Path) -> StoreResult<RecordStore<Loan>> {
        RecordStore::open(dir.join(&self.loans))
    }

    /// Open the customer feedback store
    pub fn open_feedback(&self, dir: &Path) -> StoreResult<RecordStore<Feedback>> {
        RecordStore::open(dir.join(&self.feedback))
    }

    /// Open the employee login store
    pub fn open_employees(&self, dir: &Path) -> StoreResult<RecordStore<Employee>> {
        RecordStore::open(dir.join(&self.employees))
    }

    /// Open the manager login store
    pub fn open_managers(&self, dir: &Path) -> StoreResult<RecordStore<Official>> {
        RecordStore::open(dir.join(&self.managers))
    }

    /// Open the admin login store
    pub fn open_admins(&self, dir: &Path) -> StoreResult<RecordStore<Official>> {
        RecordStore::open(dir.join(&self.admins))
    }
}
