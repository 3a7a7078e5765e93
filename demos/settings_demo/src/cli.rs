//! Command-line surface of the `settings-demo` binary.
//!
//! Source flags map one-to-one onto resolver registration calls so the
//! binary can exercise merging, conflict handling and typed lookups from a
//! shell.

use app_settings::{ConfigSource, SettingsResolver};
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::colour::{Rgb, parse_colour};
use crate::error::Result;

/// Command-line surface exposed by the demo.
#[derive(Debug, Parser)]
#[command(
    name = "settings-demo",
    about = "Merge appSettings files and read typed values from the result",
    version
)]
pub struct CommandLine {
    /// Source options shared by every subcommand.
    #[command(flatten)]
    pub sources: SourceArgs,
    /// Selected action.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where settings come from and how failures are treated.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct SourceArgs {
    /// Configuration file merged before the primary source. Repeatable.
    #[arg(short = 's', long = "source", value_name = "FILE")]
    pub sources: Vec<Utf8PathBuf>,
    /// Component binary whose `<binary>.config` is merged. Repeatable.
    #[arg(short = 'c', long = "component", value_name = "BINARY")]
    pub components: Vec<Utf8PathBuf>,
    /// Replaces `<this executable>.config` as the primary source.
    #[arg(long = "primary", value_name = "FILE")]
    pub primary: Option<Utf8PathBuf>,
    /// Lets later sources override conflicting values instead of failing.
    #[arg(long = "lenient", action = ArgAction::SetTrue)]
    pub lenient: bool,
    /// Fails on the first missing or unconvertible setting.
    #[arg(long = "fail-fast", action = ArgAction::SetTrue)]
    pub fail_fast: bool,
    /// Leaves the primary source out of the merge.
    #[arg(long = "exclude-primary", action = ArgAction::SetTrue)]
    pub exclude_primary: bool,
}

/// Subcommands implemented by the demo.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Prints the named settings converted to a kind.
    #[command(name = "get")]
    Get(GetArgs),
    /// Prints every merged setting with the source it came from.
    #[command(name = "dump")]
    Dump,
}

/// Options for the `get` command.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct GetArgs {
    /// Setting names to read.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
    /// Kind every value is converted to.
    #[arg(long = "as", value_enum, default_value_t = ValueKind::Text)]
    pub kind: ValueKind,
    /// Value used when a setting is missing, converted like a stored value.
    #[arg(long = "default", value_name = "VALUE")]
    pub default: Option<String>,
}

/// Conversion targets offered by `get --as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Text returned verbatim.
    Text,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// `true` or `false`.
    Bool,
    /// `#RRGGBB` or a palette name.
    Colour,
}

/// Builds a resolver from the source options.
///
/// Registration happens before any lookup, so it cannot hit a frozen
/// registry; duplicates are skipped silently.
///
/// # Errors
///
/// Propagates registration failures from the resolver.
pub fn build_resolver(args: &SourceArgs) -> Result<SettingsResolver> {
    let mut resolver = args
        .primary
        .as_ref()
        .map_or_else(SettingsResolver::new, |path| {
            SettingsResolver::with_primary_source(ConfigSource::file(path))
        });
    resolver.register_converter::<Rgb, _, _>(parse_colour);
    for path in &args.sources {
        resolver.register_source(ConfigSource::file(path))?;
    }
    for binary in &args.components {
        resolver.register_component(binary)?;
    }
    resolver.set_strict_conflicts(!args.lenient);
    resolver.set_continue_on_errors(!args.fail_fast);
    resolver.set_exclude_primary_source(args.exclude_primary);
    debug!(
        sources = resolver.sources().registered().len(),
        primary = ?resolver.sources().primary().map(|source| source.id().to_string()),
        "resolver configured"
    );
    Ok(resolver)
}
