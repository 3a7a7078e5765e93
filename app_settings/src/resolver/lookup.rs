//! Outcome of a single setting lookup.

use std::sync::Arc;

use crate::SettingsError;

/// Non-fatal outcome of reading a setting.
///
/// Fatal failures are returned as `Err` by the resolver instead.
#[derive(Debug)]
#[must_use]
pub enum Lookup<T> {
    /// The value was read from the merged table and converted.
    Resolved(T),
    /// The setting was missing; the caller's default was converted instead.
    Defaulted(T),
    /// The lookup failed while errors are tolerated; `value` is the type's
    /// default and `error` has been recorded.
    Degraded {
        /// Zero value returned in place of a real one.
        value: T,
        /// Failure that caused the degradation.
        error: Arc<SettingsError>,
    },
}

impl<T> Lookup<T> {
    /// Consumes the outcome, returning the carried value.
    pub fn into_value(self) -> T {
        match self {
            Self::Resolved(value) | Self::Defaulted(value) | Self::Degraded { value, .. } => value,
        }
    }

    /// Borrows the carried value.
    #[must_use]
    pub const fn value(&self) -> &T {
        match self {
            Self::Resolved(value) | Self::Defaulted(value) | Self::Degraded { value, .. } => value,
        }
    }

    /// Whether the lookup failed and a zero value stands in.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The recorded failure for a degraded lookup.
    #[must_use]
    pub fn error(&self) -> Option<&SettingsError> {
        match self {
            Self::Degraded { error, .. } => Some(&**error),
            Self::Resolved(_) | Self::Defaulted(_) => None,
        }
    }
}
