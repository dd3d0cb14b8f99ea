//! Crumb command line cart

use std::{fs, io, process::ExitCode};

use anyhow::{Context, Result};
use crumb::{
    catalog::Catalog,
    config::CartConfig,
    fixtures::{bakery_catalog, load_catalog_file},
    service::CartService,
    store::CartStore,
};
use tracing::debug;

use crate::{
    config::{Cli, Command},
    storage::FileStorage,
    terminal::{TerminalNavigator, TerminalNotifier},
};

mod commands;
mod config;
mod logging;
mod storage;
mod terminal;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            // clap renders help and version through the error path too
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            #[expect(clippy::print_stderr, reason = "top-level error report")]
            {
                eprintln!("Error: {error:#}");
            }

            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<CartConfig> {
    let Some(path) = &cli.config else {
        return Ok(CartConfig::default());
    };

    let yaml = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    CartConfig::from_yaml(&yaml).with_context(|| format!("invalid config {}", path.display()))
}

fn load_menu(cli: &Cli) -> Result<Catalog> {
    match &cli.menu {
        Some(path) => load_catalog_file(path)
            .with_context(|| format!("failed to load menu {}", path.display())),
        None => bakery_catalog().context("failed to load the built-in menu"),
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = load_config(&cli)?;
    let catalog = load_menu(&cli)?;

    let storage = FileStorage::new(&cli.storage_path);

    debug!(
        path = %storage.path().display(),
        key = config.storage_key.as_str(),
        "opening cart storage"
    );

    let mut service = CartService::new(
        &catalog,
        CartStore::with_key(storage, config.storage_key.clone()),
    );

    let mut out = io::stdout().lock();

    match cli.command {
        Command::Menu => commands::menu(&catalog, &mut out).map(|()| true),
        Command::Add(args) => {
            commands::add(&mut service, args, &TerminalNotifier::stdio(false), &mut out)
        }
        Command::Remove(args) => commands::remove(
            &mut service,
            &args.key,
            &config,
            &TerminalNotifier::stdio(args.yes),
            &mut out,
        ),
        Command::Preview => commands::preview(&service, &mut out).map(|()| true),
        Command::Show => commands::show(&service, &config, &mut out).map(|()| true),
        Command::Checkout(args) => commands::checkout(
            &mut service,
            &args,
            &config,
            &TerminalNotifier::stdio(false),
            &TerminalNavigator::stdout(),
            &mut out,
        ),
        Command::Clear => commands::clear(&mut service, &mut out).map(|()| true),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal::Decimal;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn menu_file_replaces_built_in_menu() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("menu.yml");

        fs::write(
            &path,
            "items:\n  - key: baguette\n    name: Baguette\n    section: breads\n    price: \"4.00 USD\"\n",
        )?;

        let cli = Cli::try_parse_from(["crumb", "--menu", path.to_str().ok_or("path")?, "menu"])?;
        let catalog = load_menu(&cli)?;

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("baguette").is_some());

        Ok(())
    }

    #[test]
    fn config_file_overrides_defaults() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("crumb.yml");

        fs::write(&path, "tax_rate: \"8%\"\nredirect_delay_ms: 0\n")?;

        let cli = Cli::try_parse_from(["crumb", "--config", path.to_str().ok_or("path")?, "show"])?;
        let config = load_config(&cli)?;

        assert_eq!(config.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.storage_key, "cozyCrumbCart");

        Ok(())
    }
}
