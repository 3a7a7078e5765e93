//! Rendering of lookup results and the merged table.

use std::fmt::Display;
use std::io::{self, Write};

use app_settings::{Lookup, Setting, SettingsResolver};

use crate::cli::{GetArgs, ValueKind};
use crate::colour::Rgb;
use crate::error::{DemoError, Result};

/// Writes one line per requested setting followed by any recorded errors.
///
/// Defaulted values are marked `(default)`; degraded values carry the
/// failure that replaced them with the type's zero value.
///
/// # Errors
///
/// Returns [`DemoError::InvalidDefault`] when `--default` does not convert,
/// [`DemoError::Settings`] for fatal lookup failures and [`DemoError::Io`]
/// when writing fails.
pub fn write_get_to<W: Write>(
    writer: &mut W,
    resolver: &SettingsResolver,
    args: &GetArgs,
) -> Result<()> {
    let names = &args.names;
    let default = args.default.as_deref();
    match args.kind {
        ValueKind::Text => write_values::<String, _>(writer, resolver, names, default)?,
        ValueKind::Int => write_values::<i64, _>(writer, resolver, names, default)?,
        ValueKind::Float => write_values::<f64, _>(writer, resolver, names, default)?,
        ValueKind::Bool => write_values::<bool, _>(writer, resolver, names, default)?,
        ValueKind::Colour => write_values::<Rgb, _>(writer, resolver, names, default)?,
    }
    write_errors_to(writer, resolver)?;
    Ok(())
}

/// Writes every merged setting as `key = value [origin]`.
///
/// # Errors
///
/// Returns [`DemoError::Settings`] when the merge fails and
/// [`DemoError::Io`] when writing fails.
pub fn write_dump_to<W: Write>(writer: &mut W, resolver: &SettingsResolver) -> Result<()> {
    let table = resolver.table()?;
    if table.is_empty() {
        writeln!(writer, "(no settings)")?;
    }
    for (key, entry) in table.iter() {
        writeln!(writer, "{key} = {} [{}]", entry.value(), entry.origin())?;
    }
    Ok(())
}

/// Prints the `get` report to standard output.
///
/// # Errors
///
/// See [`write_get_to`].
pub fn print_get(resolver: &SettingsResolver, args: &GetArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_get_to(&mut stdout, resolver, args)
}

/// Prints the `dump` report to standard output.
///
/// # Errors
///
/// See [`write_dump_to`].
pub fn print_dump(resolver: &SettingsResolver) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_dump_to(&mut stdout, resolver)
}

fn write_values<T, W>(
    writer: &mut W,
    resolver: &SettingsResolver,
    names: &[String],
    default: Option<&str>,
) -> Result<()>
where
    T: Setting + Display + Clone,
    W: Write,
{
    let fallback = default
        .map(|raw| {
            resolver
                .converters()
                .convert::<T>(raw)
                .map_err(|source| DemoError::InvalidDefault {
                    value: raw.to_owned(),
                    source,
                })
        })
        .transpose()?;
    for name in names {
        let outcome = match &fallback {
            Some(value) => resolver.lookup_or(name, value.clone())?,
            None => resolver.lookup::<T>(name)?,
        };
        write_outcome(writer, name, &outcome)?;
    }
    Ok(())
}

fn write_outcome<T: Display, W: Write>(
    writer: &mut W,
    name: &str,
    outcome: &Lookup<T>,
) -> io::Result<()> {
    match outcome {
        Lookup::Resolved(value) => writeln!(writer, "{name} = {value}"),
        Lookup::Defaulted(value) => writeln!(writer, "{name} = {value} (default)"),
        Lookup::Degraded { value, error } => {
            writeln!(writer, "{name} = {value} (degraded: {error})")
        }
    }
}

fn write_errors_to<W: Write>(writer: &mut W, resolver: &SettingsResolver) -> io::Result<()> {
    if !resolver.has_errors() {
        return Ok(());
    }
    writeln!(writer, "errors:")?;
    for message in resolver.errors() {
        writeln!(writer, "  {message}")?;
    }
    Ok(())
}
