// src/cli/args.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::project::LoaderConfig;

/// Method sets of Go types, and declarations generated from them
#[derive(Parser)]
#[command(name = "methodset")]
#[command(version)]
#[command(about = "Resolve Go method sets and generate interfaces, mocks, and stubs", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where Go packages are looked up.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Resolve relative imports and go.mod from DIR instead of the current directory
    #[arg(short = 'C', value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Go installation root, overriding GOROOT
    #[arg(long, value_name = "DIR", global = true)]
    pub goroot: Option<PathBuf>,

    /// GOPATH entry, overriding GOPATH (repeatable)
    #[arg(long, value_name = "DIR", global = true)]
    pub gopath: Vec<PathBuf>,

    /// Parse every package again on each lookup
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl SourceArgs {
    /// The environment's configuration with these flags applied on top.
    pub fn loader_config(&self) -> LoaderConfig {
        self.apply(LoaderConfig::from_env())
    }

    pub fn apply(&self, mut config: LoaderConfig) -> LoaderConfig {
        if let Some(dir) = &self.dir {
            config = config.with_working_dir(dir.clone());
        }
        if let Some(goroot) = &self.goroot {
            config = config.with_goroot(goroot.clone());
        }
        if !self.gopath.is_empty() {
            config = config.with_gopath(self.gopath.iter().cloned());
        }
        config.with_cache(!self.no_cache)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the interface implemented by every given type
    Interface {
        /// Name of the generated interface
        #[arg(long, value_name = "NAME")]
        out: String,

        /// Types as import/path.TypeName
        #[arg(value_name = "TARGETS", required = true)]
        targets: Vec<String>,
    },
    /// Print a function-field mock of an interface
    Mock {
        /// Import path of the package declaring the interface
        #[arg(long, value_name = "PATH")]
        pkg: String,

        /// Interface name
        #[arg(long = "type", value_name = "NAME")]
        type_name: String,
    },
    /// Print panicking method stubs implementing an interface
    Stub {
        /// Import path of the package declaring the interface
        #[arg(long, value_name = "PATH")]
        pkg: String,

        /// Interface to implement
        #[arg(long, value_name = "NAME")]
        implement: String,

        /// Receiver type, e.g. `*Store`
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Receiver variable name
        #[arg(long, value_name = "NAME")]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "methodset", "mock", "--pkg", "example.com/store", "--type", "Store", "--gopath", "/a",
            "--gopath", "/b", "--no-cache",
        ])
        .unwrap();
        assert_eq!(cli.source.gopath, vec![PathBuf::from("/a"), PathBuf::from("/b")]);

        let config = cli.source.apply(LoaderConfig::detached());
        assert_eq!(config.gopath, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(!config.cache);
        assert!(matches!(cli.command, Commands::Mock { ref type_name, .. } if type_name == "Store"));
    }

    #[test]
    fn test_interface_requires_out() {
        let missing = Cli::try_parse_from(["methodset", "interface", "a.B"]);
        assert!(missing.is_err());

        let cli = Cli::try_parse_from(["methodset", "-C", "/src", "interface", "--out", "Common", "a.B", "c.D"])
            .unwrap();
        assert_eq!(cli.source.dir, Some(PathBuf::from("/src")));
        match cli.command {
            Commands::Interface { out, targets } => {
                assert_eq!(out, "Common");
                assert_eq!(targets, vec!["a.B", "c.D"]);
            }
            _ => panic!("expected interface"),
        }
    }
}
