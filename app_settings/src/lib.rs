//! Merge key/value settings declared by several configuration sources and
//! read them back as typed values.
//!
//! A program built from several components lets each component ship its own
//! `<component>.config` file. [`SettingsResolver`] merges those files in
//! registration order, then the running program's own
//! `<executable>.config` last, into one immutable [`MergedTable`]. Typed
//! accessors convert the raw strings on demand through the [`Setting`] trait
//! or a converter registered for the target type.
//!
//! ```rust
//! use app_settings::{ConfigSource, SettingsResolver};
//!
//! let mut settings = SettingsResolver::without_primary_source();
//! settings.register_source(ConfigSource::document(
//!     "network",
//!     r#"<configuration><appSettings>
//!            <add key="Port" value="8080" />
//!        </appSettings></configuration>"#,
//! ))?;
//!
//! assert_eq!(settings.get::<u16>("Port")?, 8080);
//! assert_eq!(settings.get_or::<u32>("Retries", 3)?, 3);
//! assert!(!settings.has_errors());
//! # Ok::<(), std::sync::Arc<app_settings::SettingsError>>(())
//! ```

pub mod convert;
mod error;
mod merge;
mod provider;
mod resolver;
mod result_ext;
mod sink;
pub mod source;

use std::sync::Arc;

pub use convert::{ConvertError, ConverterRegistry, Setting, SettingKind};
pub use error::{AggregatedErrors, SettingsError};
pub use merge::{MergedEntry, MergedTable};
pub use resolver::{Lookup, SettingsResolver};
pub use result_ext::SettingsResultExt;
pub use sink::{ErrorSink, MAX_ERRORS};
pub use source::{ConfigRecord, ConfigSource, SourceId};

/// Result type returned by fallible resolver operations.
pub type SettingsResult<T> = std::result::Result<T, Arc<SettingsError>>;
