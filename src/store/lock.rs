//! Byte-range advisory write locks over store files.
//!
//! Built on Linux open-file-description locks: ownership follows the open
//! file description, so two handles opened separately exclude each other
//! whether they live in one process or two. Classic per-process record
//! locks would let threads of one process stomp each other and would drop
//! every lock when any descriptor for the file is closed.

use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg};
use tracing::warn;

use super::error::{StoreError, StoreResult};

/// How long a writer waits for an exclusive byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockWait {
    /// Block until the range is free
    Block,
    /// Retry a non-blocking acquire until the deadline, then fail with
    /// `LockTimeout`
    Bounded(Duration),
}

/// Delay between acquire attempts in bounded mode
const RETRY_INTERVAL: Duration = Duration::from_millis(5);

fn lock_range(kind: libc::c_short, offset: u64, len: u64) -> libc::flock {
    // Zeroed first: flock carries platform padding, and open-file-description
    // locks require l_pid == 0.
    let mut fl: libc::flock = unsafe { std::mem::zeroed() };
    fl.l_type = kind;
    fl.l_whence = libc::SEEK_SET as libc::c_short;
    fl.l_start = offset as libc::off_t;
    fl.l_len = len as libc::off_t;
    fl
}

/// An exclusive advisory write lock over one byte range of a file.
///
/// Dropping the guard releases the range; closing the file would release it
/// as well.
#[derive(Debug)]
pub struct RangeLock<'a> {
    file: &'a File,
    offset: u64,
    len: u64,
}

impl<'a> RangeLock<'a> {
    /// Acquire an exclusive write lock over `[offset, offset + len)`.
    ///
    /// A `len` of zero locks from `offset` through the current and any
    /// future end of file, the fcntl convention for "everything from here".
    pub fn acquire(file: &'a File, wait: LockWait, offset: u64, len: u64) -> StoreResult<Self> {
        let fl = lock_range(libc::F_WRLCK as libc::c_short, offset, len);
        match wait {
            LockWait::Block => {
                fcntl(file.as_raw_fd(), FcntlArg::F_OFD_SETLKW(&fl))
                    .map_err(|e| StoreError::Lock(io::Error::from(e)))?;
            }
            LockWait::Bounded(limit) => {
                let started = Instant::now();
                loop {
                    match fcntl(file.as_raw_fd(), FcntlArg::F_OFD_SETLK(&fl)) {
                        Ok(_) => break,
                        Err(Errno::EAGAIN) | Err(Errno::EACCES) => {
                            if started.elapsed() >= limit {
                                let waited_ms = limit.as_millis() as u64;
                                warn!(offset, len, waited_ms, "range lock timed out");
                                return Err(StoreError::LockTimeout { waited_ms });
                            }
                            std::thread::sleep(RETRY_INTERVAL);
                        }
                        Err(e) => return Err(StoreError::Lock(io::Error::from(e))),
                    }
                }
            }
        }
        Ok(Self { file, offset, len })
    }

    /// Get the locked byte offset
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Get the locked byte length, zero meaning through end of file
    pub fn len(&self) -> u64 {
        self.len
    }
}

impl Drop for RangeLock<'_> {
    fn drop(&mut self) {
        let fl = lock_range(libc::F_UNLCK as libc::c_short, self.offset, self.len);
        // Nowhere to report an unlock failure from drop; closing the handle
        // releases the range regardless.
        let _ = fcntl(self.file.as_raw_fd(), FcntlArg::F_OFD_SETLK(&fl));
    }
}

/// Run `action` while holding an exclusive write lock over the byte range,
/// releasing it on every exit path
pub fn with_exclusive_range<T>(
    file: &File,
    wait: LockWait,
    offset: u64,
    len: u64,
    action: impl FnOnce(&File) -> StoreResult<T>,
) -> StoreResult<T> {
    let guard = RangeLock::acquire(file, wait, offset, len)?;
    let result = action(file);
    drop(guard);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::path::Path;
    use tempfile::TempDir;

    fn open_rw(path: &Path) -> File {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .unwrap()
    }

    #[test]
    fn test_acquire_and_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("locked.dat");
        let file = open_rw(&path);

        let guard = RangeLock::acquire(&file, LockWait::Block, 0, 64).unwrap();
        assert_eq!(guard.offset(), 0);
        assert_eq!(guard.len(), 64);
        drop(guard);

        // Released range is immediately free for another handle
        let other = open_rw(&path);
        RangeLock::acquire(&other, LockWait::Bounded(Duration::from_millis(50)), 0, 64).unwrap();
    }

    #[test]
    fn test_bounded_wait_times_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contended.dat");
        let holder = open_rw(&path);
        let _held = RangeLock::acquire(&holder, LockWait::Block, 0, 32).unwrap();

        let waiter = open_rw(&path);
        let err =
            RangeLock::acquire(&waiter, LockWait::Bounded(Duration::from_millis(40)), 0, 32)
                .unwrap_err();
        assert!(matches!(err, StoreError::LockTimeout { .. }));
    }

    #[test]
    fn test_disjoint_ranges_do_not_contend() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("split.dat");
        let left = open_rw(&path);
        let right = open_rw(&path);

        let _first = RangeLock::acquire(&left, LockWait::Block, 0, 32).unwrap();
        RangeLock::acquire(&right, LockWait::Bounded(Duration::from_millis(50)), 32, 32).unwrap();
    }

    #[test]
    fn test_zero_len_locks_to_eof() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tail.dat");
        let holder = open_rw(&path);
        let _held = RangeLock::acquire(&holder, LockWait::Block, 100, 0).unwrap();

        let waiter = open_rw(&path);
        // Before the held offset: free
        RangeLock::acquire(&waiter, LockWait::Bounded(Duration::from_millis(50)), 0, 100).unwrap();
        // Far past the held offset: still covered
        let err = RangeLock::acquire(
            &waiter,
            LockWait::Bounded(Duration::from_millis(40)),
            5_000,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::LockTimeout { .. }));
    }

    #[test]
    fn test_with_exclusive_range_releases_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("closure.dat");
        let file = open_rw(&path);

        let result: StoreResult<()> = with_exclusive_range(&file, LockWait::Block, 0, 16, |_| {
            Err(StoreError::InvalidPosition { position: 9, len: 0 })
        });
        assert!(result.is_err());

        // The failed closure must not leave the range held
        let other = open_rw(&path);
        RangeLock::acquire(&other, LockWait::Bounded(Duration::from_millis(50)), 0, 16).unwrap();
    }
}
