//! Library facade for the `settings-demo` binary so integration tests can
//! reuse its command-line types and report writers.

pub mod cli;
pub mod colour;
pub mod error;
pub mod report;
