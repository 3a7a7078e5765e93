//! `settings-demo` entry-point: register sources, then print settings.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use settings_demo::cli::{CommandLine, Commands, build_resolver};
use settings_demo::error::Result;
use settings_demo::report::{print_dump, print_get};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = CommandLine::parse();
    let resolver = build_resolver(&cli.sources)?;
    match cli.command {
        Commands::Get(args) => print_get(&resolver, &args),
        Commands::Dump => print_dump(&resolver),
    }
}
