//! Registry of caller-supplied converters keyed by [`SettingKind`].

use std::any::Any;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{ConvertError, Setting, SettingKind};

/// Conversion function registered for a single setting type.
pub type Converter<T> = Arc<dyn Fn(&str) -> Result<T, ConvertError> + Send + Sync>;

/// Maps setting kinds to the converter that replaces their built-in
/// conversion.
///
/// Registration is typed, so the converter stored under `T::KIND` always
/// produces `T` unless two types share a custom kind name.
///
/// # Examples
///
/// ```rust
/// use app_settings::ConverterRegistry;
///
/// let mut registry = ConverterRegistry::default();
/// registry.register::<bool, _, _>(|raw: &str| match raw {
///     "yes" => Ok(true),
///     "no" => Ok(false),
///     other => Err(format!("expected yes or no, got {other}")),
/// });
///
/// assert!(registry.convert::<bool>("yes")?);
/// assert!(registry.convert::<bool>("true").is_err());
/// # Ok::<(), app_settings::ConvertError>(())
/// ```
#[derive(Default, Clone)]
pub struct ConverterRegistry {
    converters: HashMap<SettingKind, Arc<dyn Any + Send + Sync>>,
}

impl ConverterRegistry {
    /// Installs `converter` for `T`, replacing any converter previously
    /// registered for `T::KIND`.
    pub fn register<T, F, E>(&mut self, converter: F)
    where
        T: Setting,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let typed: Converter<T> =
            Arc::new(move |raw: &str| converter(raw).map_err(ConvertError::custom));
        if self.converters.insert(T::KIND, Arc::new(typed)).is_some() {
            debug!(kind = %T::KIND, "replaced registered converter");
        } else {
            debug!(kind = %T::KIND, "registered converter");
        }
    }

    /// Returns the converter registered for `T`, if any.
    #[must_use]
    pub fn lookup<T: Setting>(&self) -> Option<Converter<T>> {
        self.converters
            .get(&T::KIND)
            .and_then(|erased| (**erased).downcast_ref::<Converter<T>>())
            .map(Arc::clone)
    }

    /// Whether a converter is registered under `kind`.
    #[must_use]
    pub fn contains(&self, kind: SettingKind) -> bool {
        self.converters.contains_key(&kind)
    }

    /// Converts `raw` with the converter registered for `T`, falling back to
    /// [`Setting::parse_setting`] when none is registered.
    ///
    /// # Errors
    ///
    /// Returns the converter's [`ConvertError`], or
    /// [`ConvertError::MismatchedConverter`] when the converter registered
    /// under `T::KIND` belongs to another type.
    pub fn convert<T: Setting>(&self, raw: &str) -> Result<T, ConvertError> {
        let Some(erased) = self.converters.get(&T::KIND) else {
            return T::parse_setting(raw);
        };
        let converter = (**erased)
            .downcast_ref::<Converter<T>>()
            .ok_or(ConvertError::MismatchedConverter { kind: T::KIND })?;
        converter(raw)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}
