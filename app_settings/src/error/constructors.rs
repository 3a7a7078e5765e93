//! Constructors and classification helpers for `SettingsError`.

use std::sync::Arc;

use super::{AggregatedErrors, SettingsError};
use crate::convert::ConvertError;
use crate::source::SourceId;

impl SettingsError {
    /// Folds the failures of one merge into a single error: `None` when
    /// there are none, the failure itself when there is one, and
    /// [`Self::Aggregate`] otherwise.
    pub(crate) fn try_aggregate(mut errors: Vec<Self>) -> Option<Self> {
        if errors.len() > 1 {
            let shared = errors.into_iter().map(Arc::new).collect();
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(shared))));
        }
        errors.pop()
    }

    /// Construct a [`SettingsError::MissingSetting`].
    ///
    /// # Examples
    ///
    /// ```
    /// use app_settings::SettingsError;
    /// let e = SettingsError::missing("Port", "key not present");
    /// assert_eq!(e.to_string(), "unable to get setting [Port]: key not present");
    /// ```
    #[must_use]
    pub fn missing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingSetting {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`SettingsError::Conversion`].
    #[must_use]
    pub fn conversion(name: impl Into<String>, raw: impl Into<String>, source: ConvertError) -> Self {
        Self::Conversion {
            name: name.into(),
            raw: raw.into(),
            source,
        }
    }

    /// Construct a [`SettingsError::MalformedSource`] wrapped in an [`Arc`].
    #[must_use]
    pub fn malformed_arc(origin: &SourceId, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::MalformedSource {
            origin: origin.clone(),
            message: message.into(),
        })
    }

    /// Whether the error aborts the merge no matter how the error policy is
    /// configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use app_settings::SettingsError;
    /// assert!(!SettingsError::missing("Port", "key not present").is_merge_failure());
    /// ```
    #[must_use]
    pub fn is_merge_failure(&self) -> bool {
        match self {
            Self::Conflict { .. } | Self::MalformedSource { .. } => true,
            Self::Aggregate(errors) => errors.iter().any(Self::is_merge_failure),
            _ => false,
        }
    }
}
