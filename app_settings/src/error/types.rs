//! Primary error enum for merge and lookup flows.

use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::convert::ConvertError;
use crate::source::SourceId;

/// Errors that can occur while merging sources or resolving a setting.
///
/// [`SettingsError::Conflict`] and [`SettingsError::MalformedSource`] abort
/// the merge regardless of the resolver's error policy.
/// [`SettingsError::MissingSetting`] and [`SettingsError::Conversion`] are
/// recorded instead of returned while `continue_on_errors` is enabled.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// The key is absent from the merged table or its value is blank, and no
    /// default was supplied.
    #[error("unable to get setting [{name}]: {reason}")]
    MissingSetting {
        /// Setting that was requested.
        name: String,
        /// Why no usable value exists.
        reason: String,
    },

    /// The raw value could not be converted to the requested type.
    #[error("unable to convert value [{raw}] for setting [{name}]: {source}")]
    Conversion {
        /// Setting that was requested.
        name: String,
        /// Raw text that failed to convert.
        raw: String,
        /// Underlying conversion failure.
        #[source]
        source: ConvertError,
    },

    /// Two sources disagree about a key while strict conflict detection is
    /// enabled.
    #[error(
        "different values in different sources for [{key}]: '{existing}' from {first_source} \
         and '{incoming}' from {second_source}; remove the duplicate or disable strict conflicts"
    )]
    Conflict {
        /// Key declared by both sources.
        key: String,
        /// Value already present in the table.
        existing: String,
        /// Value supplied by the later source.
        incoming: String,
        /// Source that supplied `existing`.
        first_source: SourceId,
        /// Source that supplied `incoming`.
        second_source: SourceId,
    },

    /// A source could not be parsed into key/value records.
    #[error("unable to read {origin}: {message}")]
    MalformedSource {
        /// Source that failed to parse.
        origin: SourceId,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A source was registered after the merged table had been cached.
    #[error("cannot register {origin}: settings have already been resolved")]
    RegistryFrozen {
        /// Source whose registration was rejected.
        origin: SourceId,
    },

    /// The merged table could not be deserialized into a settings struct.
    #[error("failed to extract settings: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// Multiple errors were detected during a single merge.
    #[error("multiple settings errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
