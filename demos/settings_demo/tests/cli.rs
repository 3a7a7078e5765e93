//! End-to-end tests that run the `settings-demo` binary against settings
//! files written to a temporary directory.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::fixture::SourceDir;
use test_helpers::xml::SettingsXml;

struct Run {
    success: bool,
    stdout: String,
    stderr: String,
}

fn run(args: &[&str]) -> Result<Run> {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API for workspace binaries"
    )]
    let mut cmd = Command::cargo_bin("settings-demo")?;
    cmd.env("RUST_BACKTRACE", "0").env_remove("RUST_LOG").args(args);
    let output = cmd.output().context("run settings-demo")?;
    Ok(Run {
        success: output.status.success(),
        stdout: String::from_utf8(output.stdout)?,
        stderr: String::from_utf8(output.stderr)?,
    })
}

#[fixture]
fn dir() -> SourceDir {
    #[expect(clippy::expect_used, reason = "fixture setup failure should abort the test")]
    SourceDir::new().expect("create temporary source directory")
}

#[rstest]
fn get_reads_values_from_the_primary_override(dir: SourceDir) -> Result<()> {
    let primary = dir.write_settings(
        "app.exe.config",
        &SettingsXml::new().add("Port", "8080").add("Theme", "#102030"),
    )?;
    let outcome = run(&[
        "--primary",
        primary.as_str(),
        "get",
        "Port",
        "Theme",
        "--as",
        "text",
    ])?;
    ensure!(outcome.success, "command failed: {}", outcome.stderr);
    ensure!(outcome.stdout == "Port = 8080\nTheme = #102030\n", "stdout: {}", outcome.stdout);
    Ok(())
}

#[rstest]
fn conflicting_sources_fail_unless_lenient(dir: SourceDir) -> Result<()> {
    let first = dir.write_settings("first.config", &SettingsXml::new().add("Mode", "fast"))?;
    let second = dir.write_settings("second.config", &SettingsXml::new().add("Mode", "slow"))?;
    let missing = dir.path("absent.config");
    let base = [
        "--primary",
        missing.as_str(),
        "--source",
        first.as_str(),
        "--source",
        second.as_str(),
    ];

    let strict = run(&[&base[..], &["get", "Mode"][..]].concat())?;
    ensure!(!strict.success, "strict merge should fail");
    ensure!(strict.stderr.contains("Mode"), "stderr: {}", strict.stderr);

    let lenient = run(&[&base[..], &["--lenient", "get", "Mode"][..]].concat())?;
    ensure!(lenient.success, "lenient merge failed: {}", lenient.stderr);
    ensure!(lenient.stdout == "Mode = slow\n", "stdout: {}", lenient.stdout);
    Ok(())
}

#[rstest]
fn missing_settings_degrade_or_fail_fast(dir: SourceDir) -> Result<()> {
    let primary = dir.write_settings("app.config", &SettingsXml::new().add("Port", "80"))?;

    let tolerant = run(&["--primary", primary.as_str(), "get", "Retries", "--as", "int"])?;
    ensure!(tolerant.success, "command failed: {}", tolerant.stderr);
    ensure!(
        tolerant.stdout.starts_with("Retries = 0 (degraded: "),
        "stdout: {}",
        tolerant.stdout
    );
    ensure!(tolerant.stdout.contains("errors:\n"), "stdout: {}", tolerant.stdout);

    let strict = run(&[
        "--primary",
        primary.as_str(),
        "--fail-fast",
        "get",
        "Retries",
    ])?;
    ensure!(!strict.success, "fail-fast lookup should fail");
    ensure!(strict.stderr.contains("Retries"), "stderr: {}", strict.stderr);
    Ok(())
}

#[rstest]
fn defaults_and_colours_use_registered_conversion(dir: SourceDir) -> Result<()> {
    let primary = dir.write_settings("app.config", &SettingsXml::new().add("Accent", "orange"))?;
    let outcome = run(&[
        "--primary",
        primary.as_str(),
        "get",
        "Accent",
        "Border",
        "--as",
        "colour",
        "--default",
        "black",
    ])?;
    ensure!(outcome.success, "command failed: {}", outcome.stderr);
    ensure!(
        outcome.stdout == "Accent = #FFA500\nBorder = #000000 (default)\n",
        "stdout: {}",
        outcome.stdout
    );
    Ok(())
}

#[rstest]
fn dump_reports_origins_and_skips_excluded_primary(dir: SourceDir) -> Result<()> {
    let primary = dir.write_settings("app.config", &SettingsXml::new().add("Owner", "primary"))?;
    let component = dir.write_settings("tool.exe.config", &SettingsXml::new().add("Tool", "on"))?;
    let binary = dir.path("tool.exe");
    let args = [
        "--primary",
        primary.as_str(),
        "--component",
        binary.as_str(),
    ];

    let full = run(&[&args[..], &["dump"][..]].concat())?;
    ensure!(full.success, "dump failed: {}", full.stderr);
    ensure!(
        full.stdout.contains("Owner = primary [") && full.stdout.contains("Tool = on ["),
        "stdout: {}",
        full.stdout
    );
    ensure!(
        full.stdout.contains(component.file_name().unwrap_or_default()),
        "component origin missing: {}",
        full.stdout
    );

    let excluded = run(&[&args[..], &["--exclude-primary", "dump"][..]].concat())?;
    ensure!(excluded.success, "dump failed: {}", excluded.stderr);
    ensure!(!excluded.stdout.contains("Owner"), "stdout: {}", excluded.stdout);
    Ok(())
}
