pub mod catalog;
pub mod codec;
pub mod import;
pub mod ledger;
pub mod model;
pub mod store;

pub use catalog::{BankCatalog, CatalogError, CatalogResult};
pub use codec::{
    CodecError, CodecResult, FieldDef, FieldKind, FieldReader, FieldWriter, FixedRecord,
    RecordLayout,
};
pub use import::{import_customers, ImportError, ImportResult};
pub use ledger::{CustomerDirectory, HistoryIter, LedgerError, LedgerResult, TransactionLedger};
pub use model::{
    Customer, CustomerId, Employee, EmployeeId, Feedback, Loan, Official, Transaction,
};
pub use store::{
    with_exclusive_range, ExclusiveGuard, LockWait, RangeLock, RecordPos, RecordStore, ScanIter,
    StoreError, StoreResult,
};
