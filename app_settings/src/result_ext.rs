//! Extension for mapping errors into `SettingsResult` concisely.
//!
//! ```
//! use app_settings::{SettingsResult, SettingsResultExt};
//!
//! fn extract() -> SettingsResult<u16> {
//!     let failed: Result<u16, Box<figment::Error>> =
//!         Err(Box::new(figment::Error::from("boom")));
//!     failed.into_settings()
//! }
//! assert!(extract().is_err());
//! ```

use std::sync::Arc;

use crate::{SettingsError, SettingsResult};

/// Converts `Result<T, E>` with `E: Into<SettingsError>` into a
/// [`SettingsResult`].
pub trait SettingsResultExt<T> {
    /// Map the error through `Into<SettingsError>` and wrap it in an
    /// [`Arc`].
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion.
    fn into_settings(self) -> SettingsResult<T>;
}

impl<T, E> SettingsResultExt<T> for Result<T, E>
where
    E: Into<SettingsError>,
{
    fn into_settings(self) -> SettingsResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
