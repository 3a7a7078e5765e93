//! Error types produced while merging sources and resolving settings.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::SettingsError;
