mod error;
mod lock;
mod record_file;

pub use error::{StoreError, StoreResult};
pub use lock::{with_exclusive_range, LockWait, RangeLock};
pub use record_file::{ExclusiveGuard, RecordPos, RecordStore, ScanIter};
