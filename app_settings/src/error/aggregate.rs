//! Several merge failures reported as one error.

use std::{error::Error, fmt, sync::Arc};

use super::SettingsError;

/// Every failure found by one merge attempt, in the order the sources were
/// folded.
///
/// Only built when a merge finds more than one failure, so it always holds
/// at least two errors.
#[derive(Debug)]
pub struct AggregatedErrors(Vec<Arc<SettingsError>>);

impl AggregatedErrors {
    pub(super) const fn new(errors: Vec<Arc<SettingsError>>) -> Self {
        Self(errors)
    }

    /// The collected errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &SettingsError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of collected errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    /// One numbered line per error, e.g. `1: different values ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.iter().zip(1_usize..);
        if let Some((first, n)) = lines.next() {
            write!(f, "{n}: {first}")?;
        }
        lines.try_for_each(|(err, n)| write!(f, "\n{n}: {err}"))
    }
}

impl Error for AggregatedErrors {}
