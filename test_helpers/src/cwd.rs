//! Serialised changes of the process working directory.
//!
//! Relative source paths resolve against the working directory, which is
//! process-global. [`enter`] holds a global lock for the lifetime of the
//! returned guard and restores the previous directory on drop.
//!
//! ```no_run
//! use test_helpers::cwd;
//!
//! let guard = cwd::enter("/tmp").expect("enter /tmp");
//! drop(guard);
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use parking_lot::{Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Restores the previous working directory when dropped.
#[must_use = "dropping the guard restores the previous working directory"]
pub struct CwdGuard {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _restored = std::env::set_current_dir(&self.previous);
    }
}

/// Changes the working directory to `dir` until the guard is dropped.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or `dir` cannot
/// be entered.
pub fn enter(dir: impl AsRef<Path>) -> Result<CwdGuard> {
    let lock = CWD_LOCK.lock();
    let previous = std::env::current_dir().context("read current directory")?;
    std::env::set_current_dir(dir.as_ref())
        .with_context(|| format!("enter {}", dir.as_ref().display()))?;
    Ok(CwdGuard {
        previous,
        _lock: lock,
    })
}
