use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::arena::FamilyTree;
use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::select::{candidate_files, Selector, SkimSelector};
use crate::config::{global_config_path, Settings};
use crate::query::{ancestors_of, most_recent_common_ancestor};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let cwd = std::env::current_dir().ok();
    let settings = Settings::load(cwd.as_deref())?;
    debug!("settings: {:?}", settings);
    let selector = SkimSelector;

    match &cli.command {
        Some(Commands::Show { pretty }) => {
            let tree = load_tree(cli.file.as_deref(), &settings, &selector)?;
            print_tree(&tree, *pretty || settings.pretty);
            Ok(())
        }
        Some(Commands::Mrca { name1, name2 }) => {
            let (name1, name2) = query_names(name1.as_deref(), name2.as_deref(), &settings)?;
            let tree = load_tree(cli.file.as_deref(), &settings, &selector)?;
            output::info(&describe_mrca(&tree, &name1, &name2)?);
            Ok(())
        }
        Some(Commands::Ancestors { name }) => {
            let tree = load_tree(cli.file.as_deref(), &settings, &selector)?;
            output::info(&describe_ancestors(&tree, name)?);
            Ok(())
        }
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
        None => _default(cli.file.as_deref(), &settings, &selector),
    }
}

/// Print the tree, then answer the configured query.
#[instrument(skip(settings, selector))]
fn _default(file: Option<&Path>, settings: &Settings, selector: &dyn Selector) -> CliResult<()> {
    let tree = load_tree(file, settings, selector)?;
    output::header("Tree:");
    print_tree(&tree, settings.pretty);
    output::separator();
    output::info(&describe_mrca(
        &tree,
        &settings.query.first,
        &settings.query.second,
    )?);
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn _completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_tree(tree: &FamilyTree, pretty: bool) {
    if tree.root().is_none() {
        output::warning("tree file contains no declarations");
    }
    if pretty {
        output::info(&tree.to_tree_string());
    } else {
        output::info(tree);
    }
}

/// Explicit file wins; otherwise the user picks from the data directory.
#[instrument(skip(settings, selector))]
pub fn resolve_input(
    file: Option<&Path>,
    settings: &Settings,
    selector: &dyn Selector,
) -> CliResult<PathBuf> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }

    let dir = settings.selection_dir();
    let candidates = candidate_files(&dir, &settings.extension)?;
    if candidates.is_empty() {
        return Err(CliError::NoInput(format!(
            "no *.{} files in {}",
            settings.extension,
            dir.display()
        )));
    }

    selector
        .select_one(&candidates, "Family tree file> ")
        .map_err(CliError::Selection)?
        .ok_or_else(|| CliError::NoInput("no file selected".to_string()))
}

pub fn load_tree(
    file: Option<&Path>,
    settings: &Settings,
    selector: &dyn Selector,
) -> CliResult<FamilyTree> {
    let path = resolve_input(file, settings, selector)?;
    info!("loading {}", path.display());
    Ok(TreeBuilder::build_from_file(&path)?)
}

/// Both names from the command line, or both from config.
pub fn query_names(
    name1: Option<&str>,
    name2: Option<&str>,
    settings: &Settings,
) -> CliResult<(String, String)> {
    match (name1, name2) {
        (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
        (None, None) => Ok((settings.query.first.clone(), settings.query.second.clone())),
        _ => Err(CliError::InvalidArgs(
            "give two names, or none to use the configured query".to_string(),
        )),
    }
}

pub fn describe_mrca(tree: &FamilyTree, name1: &str, name2: &str) -> CliResult<String> {
    let ancestor = most_recent_common_ancestor(tree, name1, name2)?;
    Ok(match ancestor.and_then(|idx| tree.name(idx)) {
        Some(name) => format!(
            "Most recent common ancestor of {} and {} is {}",
            name1, name2, name
        ),
        None => format!("{} and {} have no common ancestor", name1, name2),
    })
}

pub fn describe_ancestors(tree: &FamilyTree, name: &str) -> CliResult<String> {
    let chain = ancestors_of(tree, name)?;
    Ok(std::iter::once(name)
        .chain(chain.iter().filter_map(|&idx| tree.name(idx)))
        .join(" <- "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TreeError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Picks the entry at a fixed position and records what it was offered.
    struct FakeSelector {
        pick: Option<usize>,
        offered: RefCell<Vec<PathBuf>>,
    }

    impl Selector for FakeSelector {
        fn select_one(&self, items: &[PathBuf], _prompt: &str) -> Result<Option<PathBuf>, String> {
            self.offered.replace(items.to_vec());
            Ok(self.pick.and_then(|i| items.get(i).cloned()))
        }
    }

    fn settings_for(dir: &Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_resolve_input_prefers_explicit_file() {
        let selector = FakeSelector {
            pick: Some(0),
            offered: RefCell::new(vec![]),
        };
        let path = resolve_input(
            Some(Path::new("given.txt")),
            &Settings::default(),
            &selector,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("given.txt"));
        assert!(selector.offered.borrow().is_empty());
    }

    #[test]
    fn test_resolve_input_offers_tree_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "A:B\n").unwrap();
        fs::write(temp.path().join("two.txt"), "C:D\n").unwrap();
        let selector = FakeSelector {
            pick: Some(1),
            offered: RefCell::new(vec![]),
        };

        let path = resolve_input(None, &settings_for(temp.path()), &selector).unwrap();
        assert!(path.ends_with("two.txt"));
        assert_eq!(selector.offered.borrow().len(), 2);
    }

    #[test]
    fn test_resolve_input_aborted_selection_is_no_input() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "A:B\n").unwrap();
        let selector = FakeSelector {
            pick: None,
            offered: RefCell::new(vec![]),
        };
        let result = resolve_input(None, &settings_for(temp.path()), &selector);
        assert!(matches!(result, Err(CliError::NoInput(_))));
    }

    #[test]
    fn test_resolve_input_empty_dir_is_no_input() {
        let temp = TempDir::new().unwrap();
        let selector = FakeSelector {
            pick: Some(0),
            offered: RefCell::new(vec![]),
        };
        let result = resolve_input(None, &settings_for(temp.path()), &selector);
        assert!(matches!(result, Err(CliError::NoInput(_))));
    }

    #[test]
    fn test_query_names_need_both_or_none() {
        let settings = Settings::default();
        assert_eq!(
            query_names(None, None, &settings).unwrap(),
            ("Bilbo".to_string(), "Frodo".to_string())
        );
        assert_eq!(
            query_names(Some("D"), Some("E"), &settings).unwrap(),
            ("D".to_string(), "E".to_string())
        );
        assert!(matches!(
            query_names(Some("D"), None, &settings),
            Err(CliError::InvalidArgs(_))
        ));
    }

    #[test]
    fn test_describe_mrca_and_ancestors() {
        let tree = TreeBuilder::build_from_lines(["A:B,C", "B:D,E", "C:F"]).unwrap();
        assert_eq!(
            describe_mrca(&tree, "D", "F").unwrap(),
            "Most recent common ancestor of D and F is A"
        );
        assert_eq!(
            describe_mrca(&tree, "A", "D").unwrap(),
            "A and D have no common ancestor"
        );
        assert_eq!(describe_ancestors(&tree, "E").unwrap(), "E <- B <- A");
        assert_eq!(describe_ancestors(&tree, "A").unwrap(), "A");
    }

    #[test]
    fn test_describe_mrca_unknown_name() {
        let tree = TreeBuilder::build_from_lines(["A:B"]).unwrap();
        let err = describe_mrca(&tree, "Gollum", "B").unwrap_err();
        assert!(matches!(
            err,
            CliError::Tree(TreeError::NodeNotFound { .. })
        ));
        assert_eq!(err.to_string(), "node not found for first name: \"Gollum\"");
    }
}
