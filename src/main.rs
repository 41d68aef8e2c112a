//! NodesPlus - documentation site and node browser for the NodesPlus
//! Blueprint library.

mod analytics;
mod browser;
mod build;
mod catalog;
mod cli;
mod config;
mod environment;
mod generator;
mod init;
mod inspect;
mod logger;
mod serve;
mod site;
mod utils;
mod watch;

use anyhow::{Context, Result, bail};
use build::build_site;
use catalog::{
    Catalog,
    store::{catalog, init_catalog},
};
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};
use init::new_site;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => {
            load_catalog(&config)?;
            build_site(&config, &catalog()).map(|_| ())
        }
        Commands::Serve { .. } => {
            load_catalog(&config)?;
            build_site(&config, &catalog())?;
            init_config(config);
            serve_site()
        }
        Commands::Search { term } => {
            load_catalog(&config)?;
            print!("{}", inspect::search_report(&catalog(), term));
            Ok(())
        }
        Commands::Show { id } => {
            load_catalog(&config)?;
            let catalog = catalog();
            let Some(node) = catalog.node_by_id(id) else {
                bail!("no node with id `{id}`. Try `nodesplus search` to find one.");
            };
            print!("{}", inspect::node_report(&catalog, &node));
            Ok(())
        }
        Commands::Check => {
            load_catalog(&config)?;
            print!("{}", inspect::check_report(&catalog()));
            log!("check"; "{} ok", cfg_display(&config));
            Ok(())
        }
    }
}

/// Load and validate the configured catalog, or the embedded one.
fn load_catalog(config: &SiteConfig) -> Result<()> {
    let path = config.build.catalog.as_deref();
    let catalog = Catalog::load(path).with_context(|| match path {
        Some(path) => format!("invalid catalog {}", path.display()),
        None => "invalid embedded catalog".to_owned(),
    })?;
    log!("catalog"; "{} nodes in {} categories", catalog.nodes().len(), catalog.categories().len());
    init_catalog(catalog);
    Ok(())
}

fn cfg_display(config: &SiteConfig) -> String {
    config
        .config_path
        .file_name()
        .map_or_else(|| config.config_path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
