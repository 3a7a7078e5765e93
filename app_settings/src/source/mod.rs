//! Configuration sources and the ordered registry that feeds the merge.
//!
//! A source is either a configuration file on disk, identified by its
//! resolved location, or an in-memory document identified by name. The
//! running program's own file, `<executable>.config`, is the primary source;
//! it is held apart from the registered sources and merged after them.

mod loader;
mod path;
mod xml;

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::SettingsResult;

pub use xml::{SECTION_ELEMENT, parse_records};

/// Suffix appended to a binary's path to locate its configuration file.
pub const CONFIG_SUFFIX: &str = ".config";

/// Identity of a configuration source, used for de-duplication and in
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    /// Returns the identity as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single `key`/`value` pair read from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    /// Case-sensitive, non-empty key.
    pub key: String,
    /// Raw value, possibly empty.
    pub value: String,
}

impl ConfigRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(Utf8PathBuf),
    Document(Arc<str>),
}

/// One origin of settings.
///
/// # Examples
///
/// ```rust
/// use app_settings::ConfigSource;
///
/// let source = ConfigSource::component("/opt/app/libreports.so");
/// assert_eq!(
///     source.path().map(|p| p.file_name()),
///     Some(Some("libreports.so.config"))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    id: SourceId,
    location: Location,
}

impl ConfigSource {
    /// A configuration file at `path`.
    ///
    /// Relative paths are resolved against the current working directory
    /// when the source is created. Existing files are identified by their
    /// canonical path, so two spellings of the same file share an identity.
    #[must_use]
    pub fn file(path: impl AsRef<Utf8Path>) -> Self {
        let resolved = path::resolve_identity(path.as_ref());
        Self {
            id: SourceId(resolved.to_string()),
            location: Location::File(resolved),
        }
    }

    /// The configuration file belonging to the component binary at `binary`,
    /// i.e. `<binary>.config`.
    #[must_use]
    pub fn component(binary: impl AsRef<Utf8Path>) -> Self {
        Self::file(config_path_for(binary.as_ref()))
    }

    /// An in-memory XML document identified by `name`.
    #[must_use]
    pub fn document(name: impl AsRef<str>, contents: impl Into<String>) -> Self {
        let contents: String = contents.into();
        Self {
            id: SourceId(format!("document:{}", name.as_ref())),
            location: Location::Document(contents.into()),
        }
    }

    /// The running program's own configuration file,
    /// `<current executable>.config`.
    ///
    /// Returns `None` when the executable path cannot be determined or is not
    /// valid UTF-8.
    #[must_use]
    pub fn primary() -> Option<Self> {
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(err) => {
                warn!(error = %err, "cannot determine the current executable; primary source disabled");
                return None;
            }
        };
        match Utf8PathBuf::from_path_buf(exe) {
            Ok(utf8) => Some(Self::component(utf8)),
            Err(raw) => {
                warn!(path = %raw.display(), "executable path is not valid UTF-8; primary source disabled");
                None
            }
        }
    }

    /// The identity used for de-duplication.
    #[must_use]
    pub const fn id(&self) -> &SourceId {
        &self.id
    }

    /// The file backing this source, if it is file based.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Document(_) => None,
        }
    }

    /// Reads the source's records.
    ///
    /// Files are decoded as UTF-16 when they start with a UTF-16 byte order
    /// mark and as UTF-8 otherwise.
    ///
    /// Returns `Ok(None)` when the backing file does not exist or cannot be
    /// read; an absent source contributes nothing to the merge. A file whose
    /// bytes are invalid in the detected encoding counts as unreadable and
    /// is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SettingsError::MalformedSource`] when the contents
    /// are not a valid settings document.
    pub fn load(&self) -> SettingsResult<Option<Vec<ConfigRecord>>> {
        match &self.location {
            Location::File(path) => match loader::read_source_file(path) {
                Ok(Some(text)) => parse_records(&self.id, &text).map(Some),
                Ok(None) => {
                    debug!(source = %self.id, "source file absent; skipping");
                    Ok(None)
                }
                Err(err) => {
                    warn!(source = %self.id, error = %err, "source file unreadable; skipping");
                    Ok(None)
                }
            },
            Location::Document(contents) => parse_records(&self.id, contents).map(Some),
        }
    }
}

fn config_path_for(binary: &Utf8Path) -> Utf8PathBuf {
    let mut path = binary.as_str().to_owned();
    path.push_str(CONFIG_SUFFIX);
    Utf8PathBuf::from(path)
}

/// Ordered, de-duplicated list of sources plus the primary source.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    primary: Option<ConfigSource>,
    sources: Vec<ConfigSource>,
}

impl SourceRegistry {
    /// Creates an empty registry with the given primary source.
    #[must_use]
    pub const fn new(primary: Option<ConfigSource>) -> Self {
        Self {
            primary,
            sources: Vec::new(),
        }
    }

    /// Appends `source` unless a source with the same identity is already
    /// registered or it is the primary source.
    ///
    /// Returns `true` when the source was added.
    pub fn register(&mut self, source: ConfigSource) -> bool {
        if self.primary.as_ref().is_some_and(|p| p.id == source.id) {
            debug!(source = %source.id, "primary source is merged separately; ignoring registration");
            return false;
        }
        if self.contains(&source.id) {
            debug!(source = %source.id, "source already registered");
            return false;
        }
        debug!(source = %source.id, position = self.sources.len(), "registered source");
        self.sources.push(source);
        true
    }

    /// Whether a source with identity `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &SourceId) -> bool {
        self.sources.iter().any(|s| &s.id == id)
    }

    /// Registered sources in registration order, excluding the primary.
    #[must_use]
    pub fn registered(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// The primary source, if one is configured.
    #[must_use]
    pub const fn primary(&self) -> Option<&ConfigSource> {
        self.primary.as_ref()
    }

    /// Sources in merge order: registered sources first, then the primary
    /// source unless `exclude_primary` is set.
    pub fn merge_order(&self, exclude_primary: bool) -> impl Iterator<Item = &ConfigSource> {
        let primary = if exclude_primary {
            None
        } else {
            self.primary.as_ref()
        };
        self.sources.iter().chain(primary)
    }
}
