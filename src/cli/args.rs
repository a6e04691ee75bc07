//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Family tree loader with most-recent-common-ancestor queries
///
/// Tree files hold one declaration per line: `PARENT:CHILD1,CHILD2,...`.
/// Without a subcommand the tree is printed followed by the configured query.
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Tree file (default: pick one interactively from the data directory)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the family tree
    Show {
        /// Draw with tree connectors
        #[arg(short, long)]
        pretty: bool,
    },

    /// Find the most recent common ancestor of two names
    Mrca {
        /// First name (default: query.first from config)
        name1: Option<String>,
        /// Second name (default: query.second from config)
        name2: Option<String>,
    },

    /// List ancestors of a name, nearest first
    Ancestors {
        /// Name to look up
        name: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print global config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mrca_names_are_optional() {
        let cli = Cli::try_parse_from(["famtree", "-f", "tree.txt", "mrca"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("tree.txt")));
        assert!(matches!(
            cli.command,
            Some(Commands::Mrca {
                name1: None,
                name2: None
            })
        ));
    }

    #[test]
    fn test_debug_flag_counts() {
        let cli = Cli::try_parse_from(["famtree", "-ddd", "show", "--pretty"]).unwrap();
        assert_eq!(cli.debug, 3);
        assert!(matches!(cli.command, Some(Commands::Show { pretty: true })));
    }
}
