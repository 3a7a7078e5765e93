//! Temporary directories populated with source files.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

use crate::xml::SettingsXml;

/// A temporary directory that holds configuration files for one test.
///
/// The directory is removed when the value is dropped.
pub struct SourceDir {
    root: Utf8PathBuf,
    handle: Dir,
    _temp: TempDir,
}

impl SourceDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, its path is not
    /// UTF-8, or it cannot be opened.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|p| anyhow!("temporary path is not UTF-8: {}", p.display()))?;
        let handle = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        Ok(Self {
            root,
            handle,
            _temp: temp,
        })
    }

    /// Root of the directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `name` inside the directory; the file need not exist.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `contents` to `name`, returning the absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        self.handle
            .write(name, contents)
            .with_context(|| format!("write {name}"))?;
        Ok(self.path(name))
    }

    /// Renders `doc` and writes it to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_settings(&self, name: &str, doc: &SettingsXml) -> Result<Utf8PathBuf> {
        self.write(name, &doc.render())
    }

    /// Creates the subdirectory `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, name: &str) -> Result<Utf8PathBuf> {
        self.handle
            .create_dir_all(name)
            .with_context(|| format!("create directory {name}"))?;
        Ok(self.path(name))
    }
}
