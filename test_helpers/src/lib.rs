//! Test helpers shared across crates in the workspace.
//!
//! - [`xml`] builds `appSettings` documents.
//! - [`fixture`] writes those documents into temporary directories.
//! - [`cwd`] changes the working directory for the lifetime of a guard.

pub mod cwd;
pub mod fixture;
pub mod xml;
