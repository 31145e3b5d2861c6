use std::fs::{File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::lock::{with_exclusive_range, LockWait, RangeLock};
use crate::codec::FixedRecord;

/// Position of a record within a store, counted in whole records from the
/// start of the file; byte offset = position * record size
pub type RecordPos = u64;

/// A flat file of fixed-width records of one entity type.
///
/// The file carries no header and no count: the logical record count is
/// `file length / record size`, rounded down. A partial trailing block can
/// only appear after an interrupted write; it is excluded from the logical
/// view and overwritten by the next append.
///
/// Writers on one handle serialize on an internal mutex and writers on
/// different handles (threads with their own store, or other processes) on
/// fcntl byte-range locks. Readers never take locks: a scan concurrent with
/// an update may observe the record before or after the new bytes land, and
/// a scan concurrent with appends may or may not include the new records.
#[derive(Debug)]
pub struct RecordStore<R: FixedRecord> {
    file: File,
    path: PathBuf,
    record_size: usize,
    lock_wait: LockWait,
    write_serial: Mutex<()>,
    _entity: PhantomData<R>,
}

impl<R: FixedRecord> RecordStore<R> {
    /// Open the store at `path`, creating an empty file on first use
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, LockWait::Block)
    }

    /// Open with an explicit lock-wait policy for this handle's writes
    pub fn open_with(path: impl AsRef<Path>, lock_wait: LockWait) -> StoreResult<Self> {
        // A zero-byte record would make every position computation divide
        // by zero and let a scan read empty buffers forever
        let record_size = R::LAYOUT.record_size();
        if record_size == 0 {
            return Err(StoreError::EmptyLayout {
                layout: R::LAYOUT.name(),
            });
        }
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|source| StoreError::Unavailable {
                path: path.clone(),
                source,
            })?;
        debug!(
            path = %path.display(),
            layout = R::LAYOUT.name(),
            record_size,
            "record store opened"
        );
        Ok(Self {
            file,
            path,
            record_size,
            lock_wait,
            write_serial: Mutex::new(()),
            _entity: PhantomData,
        })
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the fixed record size in bytes
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Get the lock-wait policy of this handle
    pub fn lock_wait(&self) -> LockWait {
        self.lock_wait
    }

    /// Get the number of whole records currently visible
    pub fn len(&self) -> StoreResult<u64> {
        Ok(self.logical_len()? / self.record_size as u64)
    }

    /// Check whether the store holds no whole record
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.logical_len()? == 0)
    }

    /// Byte length of the logical view: the file length rounded down to a
    /// whole number of records
    fn logical_len(&self) -> StoreResult<u64> {
        let raw = self.file.metadata()?.len();
        let torn = raw % self.record_size as u64;
        if torn != 0 {
            warn!(
                path = %self.path.display(),
                raw_len = raw,
                torn_bytes = torn,
                "partial trailing record excluded from view"
            );
        }
        Ok(raw - torn)
    }

    /// Lazily iterate every record from position 0, in file order.
    ///
    /// Restartable: each call re-reads from the start. A record that fails
    /// to decode yields `Corrupt` for its position and the scan continues
    /// with the next one.
    pub fn scan(&self) -> ScanIter<'_, R> {
        ScanIter {
            store: self,
            next_pos: 0,
            buf: vec![0u8; self.record_size],
        }
    }

    /// Find the first record matching `pred`, with its position
    pub fn find(&self, mut pred: impl FnMut(&R) -> bool) -> StoreResult<Option<(RecordPos, R)>> {
        for entry in self.scan() {
            let (pos, record) = entry?;
            if pred(&record) {
                return Ok(Some((pos, record)));
            }
        }
        Ok(None)
    }

    /// Read the record at `pos`
    pub fn read_at(&self, pos: RecordPos) -> StoreResult<R> {
        let len = self.len()?;
        if pos >= len {
            return Err(StoreError::InvalidPosition { position: pos, len });
        }
        let mut buf = vec![0u8; self.record_size];
        self.file
            .read_exact_at(&mut buf, pos * self.record_size as u64)?;
        R::from_bytes(&buf).map_err(|source| StoreError::Corrupt {
            position: pos,
            source,
        })
    }

    /// Append one record at the end of the file, returning its position.
    ///
    /// The append region is covered by an exclusive range lock. The end
    /// offset is re-checked after acquisition: another handle may have
    /// extended the file while this one waited, in which case the stale
    /// range is released and the lock is retaken at the new end.
    pub fn append(&self, record: &R) -> StoreResult<RecordPos> {
        let bytes = record.to_bytes()?;
        let size = self.record_size as u64;
        let _serial = self.serial();
        loop {
            let end = self.logical_len()?;
            let guard = RangeLock::acquire(&self.file, self.lock_wait, end, size)?;
            if self.logical_len()? != end {
                drop(guard);
                continue;
            }
            self.file.write_all_at(&bytes, end)?;
            drop(guard);
            let pos = end / size;
            debug!(path = %self.path.display(), position = pos, "record appended");
            return Ok(pos);
        }
    }

    /// Overwrite the record at a previously observed position.
    ///
    /// Concurrent updates to the same position serialize on the range lock
    /// and the last writer wins; read-modify-write callers that cannot
    /// accept lost updates must hold [`RecordStore::exclusive`] across the
    /// read and the write.
    pub fn update_at(&self, pos: RecordPos, record: &R) -> StoreResult<()> {
        let bytes = record.to_bytes()?;
        let size = self.record_size as u64;
        let len = self.len()?;
        if pos >= len {
            return Err(StoreError::InvalidPosition { position: pos, len });
        }
        let _serial = self.serial();
        with_exclusive_range(&self.file, self.lock_wait, pos * size, size, |file| {
            file.write_all_at(&bytes, pos * size)?;
            Ok(())
        })
    }

    /// Take an exclusive lock over the whole file, now and through any
    /// future end, for callers that must scan and write atomically (such as
    /// a uniqueness check followed by an append).
    ///
    /// While the guard lives, write through the guard: the plain store
    /// write methods would wait behind it.
    pub fn exclusive(&self) -> StoreResult<ExclusiveGuard<'_, R>> {
        let serial = self.serial();
        let range = RangeLock::acquire(&self.file, self.lock_wait, 0, 0)?;
        Ok(ExclusiveGuard {
            store: self,
            _serial: serial,
            _range: range,
        })
    }

    fn serial(&self) -> MutexGuard<'_, ()> {
        self.write_serial
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Exclusive whole-file section over a store.
///
/// Holds the handle's write serial and a range lock from offset 0 through
/// any future end of file, so no other writer on any handle can slip a
/// record in while the guard lives.
pub struct ExclusiveGuard<'a, R: FixedRecord> {
    store: &'a RecordStore<R>,
    _serial: MutexGuard<'a, ()>,
    _range: RangeLock<'a>,
}

impl<R: FixedRecord> ExclusiveGuard<'_, R> {
    /// Lazily iterate every record, as [`RecordStore::scan`]
    pub fn scan(&self) -> ScanIter<'_, R> {
        self.store.scan()
    }

    /// Find the first record matching `pred`, with its position
    pub fn find(&self, pred: impl FnMut(&R) -> bool) -> StoreResult<Option<(RecordPos, R)>> {
        self.store.find(pred)
    }

    /// Get the number of whole records currently visible
    pub fn len(&self) -> StoreResult<u64> {
        self.store.len()
    }

    /// Append one record under the held lock, returning its position
    pub fn append(&self, record: &R) -> StoreResult<RecordPos> {
        let bytes = record.to_bytes()?;
        let end = self.store.logical_len()?;
        self.store.file.write_all_at(&bytes, end)?;
        Ok(end / self.store.record_size as u64)
    }

    /// Overwrite the record at `pos` under the held lock
    pub fn update_at(&self, pos: RecordPos, record: &R) -> StoreResult<()> {
        let len = self.len()?;
        if pos >= len {
            return Err(StoreError::InvalidPosition { position: pos, len });
        }
        let bytes = record.to_bytes()?;
        self.store
            .file
            .write_all_at(&bytes, pos * self.store.record_size as u64)?;
        Ok(())
    }
}

/// Lazy record iterator; yields `(position, record)` in file order
pub struct ScanIter<'a, R: FixedRecord> {
    store: &'a RecordStore<R>,
    next_pos: u64,
    buf: Vec<u8>,
}

impl<R: FixedRecord> Iterator for ScanIter<'_, R> {
    type Item = StoreResult<(RecordPos, R)>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.next_pos * self.store.record_size as u64;
        match self.store.file.read_exact_at(&mut self.buf, offset) {
            Ok(()) => {
                let pos = self.next_pos;
                self.next_pos += 1;
                match R::from_bytes(&self.buf) {
                    Ok(record) => Some(Ok((pos, record))),
                    Err(source) => Some(Err(StoreError::Corrupt {
                        position: pos,
                        source,
                    })),
                }
            }
            // A short read at the tail is the end of the logical view,
            // whether the file ends cleanly or in a torn block
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => None,
            Err(e) => Some(Err(StoreError::Io(e))),
        }
    }
}
