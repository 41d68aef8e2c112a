//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NodesPlus documentation site builder
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Assets directory path (relative to project root)
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Config file name
    #[arg(short = 'C', long, default_value = "nodesplus.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Generate sitemap.xml (needs a base url)
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override `[base] url`, e.g. for preview deployments
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new site with a config, the catalog and default assets
    Init {
        /// Site directory, relative to `root`
        name: Option<PathBuf>,
    },

    /// Render the whole site into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then serve the site and rebuild on change
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// First port to try
        #[arg(short, long)]
        port: Option<u16>,

        /// Rebuild on change
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Search the node catalog
    Search {
        /// Matched against names, descriptions and keywords
        term: String,
    },

    /// Print the documentation of one node
    Show {
        /// Node id, e.g. `array-average-float`
        id: String,
    },

    /// Validate the config and the node catalog
    Check,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Build flags of `build` and `serve`.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nodesplus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = parse(&["build", "--minify=false", "--sitemap", "--clean"]);
        let args = cli.build_args().unwrap();
        assert_eq!(args.minify, Some(false));
        assert_eq!(args.sitemap, Some(true));
        assert!(args.clean);
        assert_eq!(cli.config, PathBuf::from("nodesplus.toml"));
    }

    #[test]
    fn test_parse_serve() {
        let cli = parse(&["-r", "site", "serve", "-p", "8080", "--watch", "false"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        let Commands::Serve { port, watch, .. } = &cli.command else {
            panic!("expected serve");
        };
        assert_eq!(*port, Some(8080));
        assert_eq!(*watch, Some(false));
    }

    #[test]
    fn test_parse_queries() {
        let cli = parse(&["search", "float"]);
        assert!(matches!(cli.command, Commands::Search { ref term } if term == "float"));
        assert!(cli.build_args().is_none());

        let cli = parse(&["show", "timer-n"]);
        assert!(matches!(cli.command, Commands::Show { ref id } if id == "timer-n"));

        assert!(parse(&["init"]).is_init());
        assert!(Cli::try_parse_from(["nodesplus", "show"]).is_err());
    }
}
