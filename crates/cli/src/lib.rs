mod find;
mod resolve;
mod resources;
mod tree;
mod view;

use clap::{Args, Parser, Subcommand};
use kinload_core::{LoaderConfig, ModuleLoader, ModuleLoaderBuilder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kinload",
    version,
    about = "Inspect a hierarchical module loader tree",
    long_about = "Kinload builds a loader tree from directories and archive packages, the same way an \
                  embedding host would, and lets you look at what it discovered: the node tree, every \
                  resource, where a name resolves to, and which bytes a compiled unit is defined from."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the loader tree in search order
    Tree {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Print one JSON object per node instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List every resource of every node
    Resources {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Leave out entries inside archive packages
        #[arg(long)]
        files_only: bool,
        /// List compiled units by qualified name instead
        #[arg(long, conflicts_with = "files_only")]
        units: bool,
    },
    /// Find where a resource name resolves to
    Find {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Resource name, e.g. conf/app.xml
        #[arg(value_name = "NAME")]
        name: String,
        /// Show every match instead of the first
        #[arg(long)]
        all: bool,
        /// Treat NAME as a package, e.g. com.acme
        #[arg(long)]
        package: bool,
    },
    /// Resolve compiled units by qualified name and fingerprint their bytes
    Resolve {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Qualified names, e.g. com.acme.Foo
        #[arg(value_name = "QUALIFIED_NAME", required = true)]
        names: Vec<String>,
    },
}

/// Options shared by every command that builds a tree.
#[derive(Args, Debug, Default)]
pub struct LoaderArgs {
    /// Directory or archive package (repeatable, in search order)
    #[arg(long = "location", short = 'l', value_name = "LOCATION")]
    pub locations: Vec<String>,
    /// JSON configuration file; command-line options are applied on top
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Directory for archive copies (overrides KINLOAD_WORK_PATH)
    #[arg(long)]
    pub work_path: Option<PathBuf>,
    /// Resolve relative locations against this directory
    #[arg(long)]
    pub base_path: Option<PathBuf>,
    /// Package never resolved from the tree (repeatable)
    #[arg(long = "exclude-package", value_name = "PACKAGE")]
    pub exclude_packages: Vec<String>,
    /// Class never resolved from the tree (repeatable)
    #[arg(long = "exclude-class", value_name = "CLASS")]
    pub exclude_classes: Vec<String>,
}

impl LoaderArgs {
    pub fn config(&self) -> Result<LoaderConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => LoaderConfig::from_file(path)?,
            None => LoaderConfig::default(),
        }
        .with_env();

        config
            .resource_locations
            .extend(self.locations.iter().cloned());
        if self.work_path.is_some() {
            config.work_path = self.work_path.clone();
        }
        if self.base_path.is_some() {
            config.base_path = self.base_path.clone();
        }
        config
            .exclude_packages
            .extend(self.exclude_packages.iter().cloned());
        config
            .exclude_classes
            .extend(self.exclude_classes.iter().cloned());
        Ok(config)
    }

    pub fn builder(&self) -> Result<ModuleLoaderBuilder, Box<dyn std::error::Error>> {
        Ok(ModuleLoader::builder().with_config(self.config()?))
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = kinload_core::logging::init_logging("cli", false);

    match cli.command {
        Commands::Tree { loader, json } => tree::run(&loader, json),
        Commands::Resources {
            loader,
            files_only,
            units,
        } => resources::run(&loader, files_only, units),
        Commands::Find {
            loader,
            name,
            all,
            package,
        } => find::run(&loader, &name, all, package),
        Commands::Resolve { loader, names } => resolve::run(&loader, &names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_merge_onto_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("kinload.json");
        std::fs::write(
            &config_path,
            r#"{"resourceLocations": ["classes"], "excludePackages": ["com.acme"]}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "kinload",
            "tree",
            "-l",
            "lib/ext.jar",
            "--config",
            config_path.to_str().unwrap(),
            "--base-path",
            "/app",
            "--exclude-class",
            "a.B",
        ])
        .unwrap();

        let Commands::Tree { loader, json } = cli.command else {
            panic!("expected the tree command");
        };
        assert!(!json);

        let config = loader.config().unwrap();
        assert_eq!(config.resource_locations, vec!["classes", "lib/ext.jar"]);
        assert_eq!(config.base_path, Some(PathBuf::from("/app")));
        assert_eq!(config.exclude_packages, vec!["com.acme"]);
        assert_eq!(config.exclude_classes, vec!["a.B"]);
    }

    #[test]
    fn test_units_and_files_only_conflict() {
        assert!(Cli::try_parse_from(["kinload", "resources", "--units", "--files-only"]).is_err());
        assert!(Cli::try_parse_from(["kinload", "find", "--package", "com.acme"]).is_ok());
    }

    #[test]
    fn test_resolve_requires_a_name() {
        assert!(Cli::try_parse_from(["kinload", "resolve"]).is_err());
    }
}
