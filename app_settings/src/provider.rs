//! Figment provider over the merged table, for extracting a whole settings
//! struct at once.

use figment::value::{Dict, Map, Value};
use figment::{Error, Figment, Metadata, Profile, Provider};
use serde::de::DeserializeOwned;

use crate::merge::MergedTable;
use crate::resolver::SettingsResolver;
use crate::{SettingsResult, SettingsResultExt};

impl Provider for MergedTable {
    fn metadata(&self) -> Metadata {
        Metadata::named("merged app settings")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let dict: Dict = self
            .iter()
            .map(|(key, entry)| (key.to_owned(), Value::from(entry.value().to_owned())))
            .collect();
        Ok(Profile::Default.collect(dict))
    }
}

impl SettingsResolver {
    /// Deserializes every merged setting into `S`.
    ///
    /// Field names match keys exactly. Values are text, so numbers and
    /// booleans are read leniently (`"8080"` fills a `u16`).
    ///
    /// # Errors
    ///
    /// Returns merge failures, or [`crate::SettingsError::Extract`] when the
    /// table does not fit `S`. Extraction failures are never recorded in the
    /// error sink.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use app_settings::{ConfigSource, SettingsResolver};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "PascalCase")]
    /// struct Network {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let mut settings = SettingsResolver::without_primary_source();
    /// settings.register_source(ConfigSource::document(
    ///     "network",
    ///     r#"<appSettings>
    ///            <add key="Host" value="localhost" />
    ///            <add key="Port" value="8080" />
    ///        </appSettings>"#,
    /// ))?;
    /// let network: Network = settings.extract()?;
    /// assert_eq!(network.port, 8080);
    /// # Ok::<(), std::sync::Arc<app_settings::SettingsError>>(())
    /// ```
    pub fn extract<S: DeserializeOwned>(&self) -> SettingsResult<S> {
        let table = self.table()?;
        Figment::from(table.clone())
            .extract_lossy()
            .map_err(Box::new)
            .into_settings()
    }
}
