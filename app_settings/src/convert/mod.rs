//! Conversion from raw setting text into typed values.
//!
//! Every readable type implements [`Setting`], which names its
//! [`SettingKind`] and supplies the built-in conversion. Built-in rules are
//! locale independent: surrounding whitespace is ignored for numbers and
//! booleans, `.` is the only decimal separator and booleans match `true` or
//! `false` in any case. A converter registered in the [`ConverterRegistry`]
//! for a kind replaces the built-in rule for that kind entirely.

mod builtin;
mod registry;

use std::error::Error;
use std::fmt;

use thiserror::Error;

pub use registry::{Converter, ConverterRegistry};

/// The closed set of kinds the resolver knows how to convert, plus an open
/// arm for caller-defined types.
///
/// Converters are registered and looked up by kind, so two distinct types
/// must not share a [`SettingKind::Custom`] name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SettingKind {
    /// `bool`.
    Bool,
    /// `char`.
    Char,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `i128`.
    I128,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `u128`.
    U128,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    Text,
    /// `std::path::PathBuf`.
    Path,
    /// `camino::Utf8PathBuf`.
    Utf8Path,
    /// A caller-defined type identified by name.
    Custom(&'static str),
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "string",
            Self::Path => "path",
            Self::Utf8Path => "utf-8 path",
            Self::Custom(name) => name,
        };
        f.write_str(name)
    }
}

/// Reasons a raw value could not be converted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The text is not a valid representation of the kind.
    #[error("not a valid {kind}: {message}")]
    Invalid {
        /// Kind that was requested.
        kind: SettingKind,
        /// Parser diagnostic.
        message: String,
    },

    /// The kind has no built-in conversion and no converter is registered.
    #[error("no conversion available for {kind}; register a converter for it")]
    Unsupported {
        /// Kind that was requested.
        kind: SettingKind,
    },

    /// The converter registered under the kind produces a different type.
    #[error("the converter registered for {kind} produces a different type")]
    MismatchedConverter {
        /// Kind whose converter does not match the requested type.
        kind: SettingKind,
    },

    /// A registered converter rejected the value.
    #[error(transparent)]
    Custom(Box<dyn Error + Send + Sync>),
}

impl ConvertError {
    /// Construct a [`ConvertError::Invalid`] from a parser diagnostic.
    #[must_use]
    pub fn invalid(kind: SettingKind, message: impl fmt::Display) -> Self {
        Self::Invalid {
            kind,
            message: message.to_string(),
        }
    }

    /// Wrap a failure reported by a registered converter.
    #[must_use]
    pub fn custom(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }
}

/// A type that can be read from a setting.
///
/// The zero value returned after a degraded lookup is `Self::default()`.
/// Defaults passed to [`crate::SettingsResolver::get_or`] are rendered with
/// [`Setting::render_setting`] and converted back, so a rendered value must
/// parse as the same type.
///
/// Types with no natural text form can rely on the default
/// [`Setting::parse_setting`], which always fails, and have callers register
/// a converter instead.
///
/// # Examples
///
/// ```rust
/// use app_settings::{ConvertError, Setting, SettingKind};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Percent(u8);
///
/// impl Setting for Percent {
///     const KIND: SettingKind = SettingKind::Custom("percent");
///
///     fn parse_setting(raw: &str) -> Result<Self, ConvertError> {
///         let digits = raw.trim().trim_end_matches('%');
///         digits
///             .parse::<u8>()
///             .map(Percent)
///             .map_err(|e| ConvertError::invalid(Self::KIND, e))
///     }
///
///     fn render_setting(&self) -> String {
///         format!("{}%", self.0)
///     }
/// }
///
/// assert_eq!(Percent::parse_setting("40%")?, Percent(40));
/// # Ok::<(), ConvertError>(())
/// ```
pub trait Setting: Default + Send + Sync + Sized + 'static {
    /// Kind under which converters for this type are registered.
    const KIND: SettingKind;

    /// Built-in conversion used when no converter is registered.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when `raw` does not represent a value of
    /// this type. The default implementation always returns
    /// [`ConvertError::Unsupported`].
    fn parse_setting(_raw: &str) -> Result<Self, ConvertError> {
        Err(ConvertError::Unsupported { kind: Self::KIND })
    }

    /// Text used when this value stands in for a missing setting.
    fn render_setting(&self) -> String;
}

#[cfg(test)]
mod tests;
