//! Site configuration in `nodesplus.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[base]`   | Product name, site url, store and Discord links |
//! | `[build]`  | Paths, catalog source, minify, sitemap, index  |
//! | `[docs]`   | Mobile breakpoint, recently viewed, theme      |
//! | `[serve]`  | Development server (interface, port, watch)    |
//! | `[extra]`  | Free-form fields                               |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "NodesPlus"
//! url = "https://nodesplus.dev"
//!
//! [build]
//! output = "public"
//! catalog = "catalog/nodes.json"
//!
//! [docs]
//! recent_limit = 8
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod docs;
mod error;
mod handle;
mod serve;

use base::BaseConfig;
use build::BuildConfig;
use docs::DocsConfig;
use error::ConfigError;
use serve::ServeConfig;

pub use handle::{cfg, init_config, reload_config};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Root of nodesplus.toml.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path of the loaded file
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config for `cli`: read the file if present, apply the CLI
    /// overrides and validate.
    ///
    /// `init` needs the file to be absent, every other command needs it.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = match &cli.command {
            Commands::Init { name: Some(name) } => root.join(name).join(&cli.config),
            _ => root.join(&cli.config),
        };

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        match (cli.is_init(), config.config_path.exists()) {
            (true, true) => bail!(
                "{} already exists. Remove it or init in a different path.",
                config.config_path.display()
            ),
            (false, false) => bail!("{} not found. Run `nodesplus init` first.", config.config_path.display()),
            (true, false) => {}
            (false, true) => config.validate()?,
        }

        Ok(config)
    }

    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Absolute sitemap path, or `None` when no sitemap is written.
    pub fn sitemap_path(&self) -> Option<PathBuf> {
        (self.build.sitemap.enable && self.base.url.is_some())
            .then(|| self.build.output.join(&self.build.sitemap.path))
    }

    /// Footer copyright line.
    pub fn copyright(&self) -> String {
        if self.base.copyright.is_empty() {
            format!("© {} {}", chrono::Local::now().format("%Y"), self.base.title)
        } else {
            self.base.copyright.clone()
        }
    }

    /// Apply CLI arguments on top of the file contents.
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };
        self.update_path_with_root(&root, cli);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        if let Commands::Serve { interface, port, watch, .. } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every configured path against `root`.
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = normalize_path(root);
        self.set_root(&root);

        self.config_path = normalize_path(&root.join(&cli.config));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.build.assets = normalize_path(&root.join(&self.build.assets));
        if let Some(catalog) = &self.build.catalog {
            self.build.catalog = Some(normalize_path(&root.join(catalog)));
        }
    }

    /// Checks that need the resolved paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base.url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "[base] url must start with http:// or https://".into(),
            ));
        }

        if self.docs.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "[docs] mobile_breakpoint must be positive".into(),
            ));
        }

        if let Some(catalog) = &self.build.catalog
            && !catalog.is_file()
        {
            return Err(ConfigError::Validation(format!(
                "[build] catalog `{}` is not a file",
                catalog.display()
            )));
        }

        if self.build.output == self.get_root() {
            return Err(ConfigError::Validation(
                "[build] output must not be the project root".into(),
            ));
        }

        Ok(())
    }
}

/// Absolute form of `path`, canonical when it exists.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
