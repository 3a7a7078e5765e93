//! The typed settings accessor and its one-shot merged table.

mod lookup;

use std::borrow::Cow;
use std::error::Error;
#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use camino::Utf8Path;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::convert::{ConverterRegistry, Setting};
use crate::merge::{MergedTable, merge_sources};
use crate::sink::ErrorSink;
use crate::source::{ConfigSource, SourceId, SourceRegistry};
use crate::{SettingsError, SettingsResult};

pub use lookup::Lookup;

/// Merges registered sources on first use and serves typed settings from the
/// cached result.
///
/// Sources and converters are registered through `&mut self` during setup.
/// The first lookup merges every source exactly once, even when several
/// threads race to perform it; later lookups read the cached table without
/// locking. Once the table is cached further source registrations are
/// rejected with [`SettingsError::RegistryFrozen`]. A failed merge is not
/// cached, so the next lookup retries it from scratch.
///
/// The error policy flags can be changed at any time through `&self` and are
/// read at the moment they apply:
///
/// - `continue_on_errors` (default `true`): record missing settings and
///   conversion failures in the error sink and return the type's default
///   instead of an `Err`.
/// - `strict_conflicts` (default `true`): fail the merge when two sources
///   give a key different values.
/// - `exclude_primary_source` (default `false`): leave the program's own
///   configuration file out of the merge.
#[derive(Debug)]
pub struct SettingsResolver {
    sources: SourceRegistry,
    converters: ConverterRegistry,
    continue_on_errors: AtomicBool,
    strict_conflicts: AtomicBool,
    exclude_primary_source: AtomicBool,
    sink: ErrorSink,
    table: OnceLock<MergedTable>,
    merge_lock: Mutex<()>,
    #[cfg(test)]
    merge_runs: AtomicUsize,
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsResolver {
    /// Creates a resolver whose primary source is
    /// `<current executable>.config`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(SourceRegistry::new(ConfigSource::primary()))
    }

    /// Creates a resolver with an explicit primary source.
    #[must_use]
    pub fn with_primary_source(primary: ConfigSource) -> Self {
        Self::with_registry(SourceRegistry::new(Some(primary)))
    }

    /// Creates a resolver that merges registered sources only.
    #[must_use]
    pub fn without_primary_source() -> Self {
        Self::with_registry(SourceRegistry::new(None))
    }

    fn with_registry(sources: SourceRegistry) -> Self {
        Self {
            sources,
            converters: ConverterRegistry::default(),
            continue_on_errors: AtomicBool::new(true),
            strict_conflicts: AtomicBool::new(true),
            exclude_primary_source: AtomicBool::new(false),
            sink: ErrorSink::default(),
            table: OnceLock::new(),
            merge_lock: Mutex::new(()),
            #[cfg(test)]
            merge_runs: AtomicUsize::new(0),
        }
    }

    /// Registers `source` to be merged after those already registered.
    ///
    /// Returns `Ok(false)` when a source with the same identity is already
    /// registered or `source` is the primary source.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::RegistryFrozen`] once the merged table has
    /// been cached.
    pub fn register_source(&mut self, source: ConfigSource) -> SettingsResult<bool> {
        if self.table.get().is_some() {
            return Err(Arc::new(SettingsError::RegistryFrozen {
                origin: source.id().clone(),
            }));
        }
        Ok(self.sources.register(source))
    }

    /// Registers the configuration file of the component binary at
    /// `binary`, i.e. `<binary>.config`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::RegistryFrozen`] once the merged table has
    /// been cached.
    pub fn register_component(&mut self, binary: impl AsRef<Utf8Path>) -> SettingsResult<bool> {
        self.register_source(ConfigSource::component(binary))
    }

    /// Installs `converter` for `T`, replacing the built-in conversion and
    /// any converter registered earlier for `T`.
    pub fn register_converter<T, F, E>(&mut self, converter: F)
    where
        T: Setting,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.converters.register(converter);
    }

    /// The registered sources.
    #[must_use]
    pub const fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// The registered converters.
    #[must_use]
    pub const fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Whether lookup failures are recorded rather than returned.
    #[must_use]
    pub fn continue_on_errors(&self) -> bool {
        self.continue_on_errors.load(Ordering::Relaxed)
    }

    /// Sets whether lookup failures are recorded rather than returned.
    pub fn set_continue_on_errors(&self, enabled: bool) {
        self.continue_on_errors.store(enabled, Ordering::Relaxed);
    }

    /// Whether disagreeing sources fail the merge.
    #[must_use]
    pub fn strict_conflicts(&self) -> bool {
        self.strict_conflicts.load(Ordering::Relaxed)
    }

    /// Sets whether disagreeing sources fail the merge. Has no effect once
    /// the table is cached.
    pub fn set_strict_conflicts(&self, enabled: bool) {
        self.strict_conflicts.store(enabled, Ordering::Relaxed);
    }

    /// Whether the primary source is left out of the merge.
    #[must_use]
    pub fn exclude_primary_source(&self) -> bool {
        self.exclude_primary_source.load(Ordering::Relaxed)
    }

    /// Sets whether the primary source is left out of the merge. Has no
    /// effect once the table is cached.
    pub fn set_exclude_primary_source(&self, excluded: bool) {
        self.exclude_primary_source.store(excluded, Ordering::Relaxed);
    }

    /// Whether the merged table has been cached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.table.get().is_some()
    }

    /// Returns the merged table, merging the sources first if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MalformedSource`] or
    /// [`SettingsError::Conflict`] (possibly aggregated) when the merge
    /// fails. These errors are returned whatever the error policy.
    pub fn table(&self) -> SettingsResult<&MergedTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let _guard = self.merge_lock.lock();
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        #[cfg(test)]
        self.merge_runs.fetch_add(1, Ordering::Relaxed);
        let merged = merge_sources(
            self.sources.merge_order(self.exclude_primary_source()),
            self.strict_conflicts(),
        )?;
        Ok(self.table.get_or_init(|| merged))
    }

    /// Reads `name` as a `T`.
    ///
    /// A missing or blank setting, or one that fails to convert, yields
    /// `T::default()` and records the failure while errors are tolerated.
    ///
    /// # Errors
    ///
    /// Returns merge failures always, and lookup failures when
    /// `continue_on_errors` is disabled.
    pub fn get<T: Setting>(&self, name: &str) -> SettingsResult<T> {
        self.lookup(name).map(Lookup::into_value)
    }

    /// Reads `name` as a `T`, converting `default` when the setting is
    /// missing or blank.
    ///
    /// The default is rendered with [`Setting::render_setting`] and passed
    /// through the same conversion as a configured value.
    ///
    /// # Errors
    ///
    /// Returns merge failures always, and conversion failures when
    /// `continue_on_errors` is disabled.
    pub fn get_or<T: Setting>(&self, name: &str, default: T) -> SettingsResult<T> {
        self.lookup_or(name, default).map(Lookup::into_value)
    }

    /// Like [`SettingsResolver::get`], reporting whether the value was
    /// degraded.
    ///
    /// # Errors
    ///
    /// As for [`SettingsResolver::get`].
    pub fn lookup<T: Setting>(&self, name: &str) -> SettingsResult<Lookup<T>> {
        self.resolve(name, None)
    }

    /// Like [`SettingsResolver::get_or`], reporting whether the value was
    /// defaulted or degraded.
    ///
    /// # Errors
    ///
    /// As for [`SettingsResolver::get_or`].
    pub fn lookup_or<T: Setting>(&self, name: &str, default: T) -> SettingsResult<Lookup<T>> {
        self.resolve(name, Some(default))
    }

    /// The source that supplied `name`, if the key is present.
    ///
    /// # Errors
    ///
    /// Returns merge failures.
    pub fn origin(&self, name: &str) -> SettingsResult<Option<SourceId>> {
        Ok(self.table()?.entry(name).map(|e| e.origin().clone()))
    }

    /// Recorded failure messages in order, at most [`crate::MAX_ERRORS`].
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.sink.errors()
    }

    /// Whether any failure has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.sink.has_errors()
    }

    fn resolve<T: Setting>(&self, name: &str, default: Option<T>) -> SettingsResult<Lookup<T>> {
        let table = self.table()?;
        let (raw, defaulted) = match table.get(name) {
            Some(value) if !value.trim().is_empty() => (Cow::Borrowed(value), false),
            found => {
                let Some(default) = default else {
                    let reason = if found.is_some() {
                        "value is blank"
                    } else {
                        "key not present"
                    };
                    return self.degrade(SettingsError::missing(name, reason));
                };
                (Cow::Owned(default.render_setting()), true)
            }
        };
        match self.converters.convert::<T>(&raw) {
            Ok(value) if defaulted => Ok(Lookup::Defaulted(value)),
            Ok(value) => Ok(Lookup::Resolved(value)),
            Err(err) => self.degrade(SettingsError::conversion(name, raw, err)),
        }
    }

    fn degrade<T: Setting>(&self, err: SettingsError) -> SettingsResult<Lookup<T>> {
        let error = Arc::new(err);
        if !self.continue_on_errors() {
            debug!(error = %error, "setting lookup failed");
            return Err(error);
        }
        warn!(error = %error, "setting degraded to its default value");
        self.sink.record(error.to_string());
        Ok(Lookup::Degraded {
            value: T::default(),
            error,
        })
    }

    #[cfg(test)]
    pub(crate) fn merge_runs(&self) -> usize {
        self.merge_runs.load(Ordering::Relaxed)
    }
}
