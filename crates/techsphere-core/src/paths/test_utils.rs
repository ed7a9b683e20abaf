//! Scoped `TECHSPHERE_DATA_DIR` overrides for path tests.

use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::DATA_DIR_ENV;

static DATA_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Points the data root somewhere else until dropped.
///
/// Holds a process-wide lock so tests touching the variable run one at a time.
pub struct DataDirOverride {
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl DataDirOverride {
    pub fn set(value: impl AsRef<Path>) -> Self {
        let lock = DATA_DIR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = env::var_os(DATA_DIR_ENV);
        // SAFETY: every writer of this variable holds DATA_DIR_LOCK.
        #[allow(unsafe_code)]
        unsafe {
            env::set_var(DATA_DIR_ENV, value.as_ref());
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for DataDirOverride {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: the lock is still held; it is released after this body runs.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var(DATA_DIR_ENV, value),
                None => env::remove_var(DATA_DIR_ENV),
            }
        }
    }
}
