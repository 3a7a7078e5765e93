//! Integration tests merging settings from configuration files on disk.

use anyhow::{Result, ensure};
use app_settings::{ConfigSource, SettingsError, SettingsResolver};
use rstest::{fixture, rstest};
use test_helpers::cwd;
use test_helpers::fixture::SourceDir;
use test_helpers::xml::SettingsXml;

#[fixture]
fn dir() -> SourceDir {
    SourceDir::new().expect("create source directory")
}

/// Writes `reports.dll.config` and `app.exe.config` with the given values
/// for `Theme` and returns a resolver whose primary source is the latter.
fn component_and_primary(dir: &SourceDir, library: &str, primary: &str) -> Result<SettingsResolver> {
    dir.write_settings(
        "reports.dll.config",
        &SettingsXml::new().add("Theme", library).add("PageSize", "25"),
    )?;
    dir.write_settings(
        "app.exe.config",
        &SettingsXml::new().add("Theme", primary).add("Title", "Ledger"),
    )?;
    let mut resolver = SettingsResolver::with_primary_source(ConfigSource::component(dir.path("app.exe")));
    resolver.register_component(dir.path("reports.dll"))?;
    Ok(resolver)
}

#[rstest]
fn component_and_primary_files_are_merged(dir: SourceDir) -> Result<()> {
    let resolver = component_and_primary(&dir, "dark", "dark")?;

    ensure!(resolver.get::<String>("Theme")? == "dark");
    ensure!(resolver.get::<u32>("PageSize")? == 25);
    ensure!(resolver.get::<String>("Title")? == "Ledger");
    ensure!(!resolver.has_errors(), "errors: {:?}", resolver.errors());
    Ok(())
}

#[rstest]
fn primary_file_wins_in_lenient_mode(dir: SourceDir) -> Result<()> {
    let resolver = component_and_primary(&dir, "light", "dark")?;
    resolver.set_strict_conflicts(false);

    ensure!(resolver.get::<String>("Theme")? == "dark");
    let origin = resolver.origin("Theme")?.map(|id| id.to_string()).unwrap_or_default();
    ensure!(origin.ends_with("app.exe.config"), "origin was {origin}");
    Ok(())
}

#[rstest]
fn excluding_primary_file_keeps_component_value(dir: SourceDir) -> Result<()> {
    let resolver = component_and_primary(&dir, "light", "dark")?;
    resolver.set_strict_conflicts(false);
    resolver.set_exclude_primary_source(true);

    ensure!(resolver.get::<String>("Theme")? == "light");
    ensure!(resolver.get::<String>("Title")?.is_empty());
    ensure!(resolver.has_errors());
    Ok(())
}

#[rstest]
fn strict_mode_names_the_conflicting_key_and_files(dir: SourceDir) -> Result<()> {
    let resolver = component_and_primary(&dir, "light", "dark")?;

    let Err(err) = resolver.get_or::<String>("Title", String::new()) else {
        anyhow::bail!("expected a conflict");
    };
    ensure!(matches!(&*err, SettingsError::Conflict { .. }), "got {err:?}");
    let message = err.to_string();
    ensure!(message.contains("[Theme]"), "message: {message}");
    ensure!(message.contains("reports.dll.config"), "message: {message}");
    ensure!(message.contains("app.exe.config"), "message: {message}");
    Ok(())
}

#[rstest]
fn missing_component_file_is_optional(dir: SourceDir) -> Result<()> {
    dir.write_settings("app.exe.config", &SettingsXml::new().add("Title", "Ledger"))?;
    let mut resolver = SettingsResolver::with_primary_source(ConfigSource::component(dir.path("app.exe")));
    ensure!(resolver.register_component(dir.path("absent.dll"))?);

    ensure!(resolver.get::<String>("Title")? == "Ledger");
    Ok(())
}

#[rstest]
fn malformed_file_aborts_resolution(dir: SourceDir) -> Result<()> {
    let path = dir.write_settings(
        "broken.config",
        &SettingsXml::new().add("Fine", "1").raw(r#"<add key="NoValue" />"#),
    )?;
    let mut resolver = SettingsResolver::without_primary_source();
    resolver.register_source(ConfigSource::file(&path))?;

    let Err(err) = resolver.get_or::<u8>("Fine", 0) else {
        anyhow::bail!("expected a malformed source error");
    };
    ensure!(matches!(&*err, SettingsError::MalformedSource { .. }), "got {err:?}");
    ensure!(err.to_string().contains("broken.config"));
    Ok(())
}

#[rstest]
fn fixed_file_can_be_merged_after_a_failure(dir: SourceDir) -> Result<()> {
    let path = dir.write("late.config", "<appSettings><add key=\"K\"/></appSettings>")?;
    let mut resolver = SettingsResolver::without_primary_source();
    resolver.register_source(ConfigSource::file(&path))?;
    ensure!(resolver.get::<String>("K").is_err());

    dir.write_settings("late.config", &SettingsXml::new().add("K", "repaired"))?;
    ensure!(resolver.get::<String>("K")? == "repaired");
    Ok(())
}

#[rstest]
fn relative_and_absolute_spellings_are_one_source(dir: SourceDir) -> Result<()> {
    let absolute = dir.write_settings("lib.config", &SettingsXml::new().add("K", "v"))?;
    let mut resolver = SettingsResolver::without_primary_source();
    {
        let _guard = cwd::enter(dir.root())?;
        ensure!(resolver.register_source(ConfigSource::file("lib.config"))?);
    }
    ensure!(!resolver.register_source(ConfigSource::file(&absolute))?);
    ensure!(resolver.sources().registered().len() == 1);
    ensure!(resolver.get::<String>("K")? == "v");
    Ok(())
}

#[rstest]
fn utf16_file_with_byte_order_mark_is_read(dir: SourceDir) -> Result<()> {
    let xml = SettingsXml::new()
        .add("Greeting", "Grüß Gott")
        .render()
        .replacen("utf-8", "utf-16", 1);
    let mut bytes = vec![0xFF, 0xFE];
    for unit in xml.encode_utf16() {
        bytes.push(u8::try_from(unit & 0xFF)?);
        bytes.push(u8::try_from(unit >> 8)?);
    }
    let path = dir.write("wide.config", bytes)?;
    let mut resolver = SettingsResolver::without_primary_source();
    resolver.register_source(ConfigSource::file(&path))?;

    ensure!(resolver.get::<String>("Greeting")? == "Grüß Gott");
    ensure!(!resolver.has_errors(), "errors: {:?}", resolver.errors());
    Ok(())
}

#[rstest]
fn file_with_invalid_utf8_is_skipped(dir: SourceDir) -> Result<()> {
    let path = dir.write("garbled.config", [0x3C_u8, 0xC3, 0x28, 0x3E])?;
    let mut resolver = SettingsResolver::without_primary_source();
    resolver.register_source(ConfigSource::file(&path))?;

    ensure!(resolver.table()?.is_empty());
    Ok(())
}
