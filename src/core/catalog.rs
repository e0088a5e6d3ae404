//! # Catalog
//!
//! Loads the command catalog of a tab (`gc.json`, `gio.json`, `lc.json`) and audits it.
//! A catalog that parses is always usable: inconsistencies such as a dangling option-set
//! reference degrade to an empty slot at resolution time, and `audit` reports them so the
//! author can fix the document. A malformed argument is read as an unsupported one and
//! never takes its siblings down with it.

use crate::{
    core::{resolver, search, template},
    models::{ArgumentKind, Command, CommandTab, OptionSource},
};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read catalog '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog '{}' is not valid: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Command with id {0} not found in this catalog.")]
    NotFound(u32),
}

/// Parses a catalog document: a JSON array of commands.
pub fn parse_catalog(json: &str) -> Result<Vec<Command>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The commands of one tab.
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    pub tab: CommandTab,
    pub commands: Vec<Command>,
}

impl CommandCatalog {
    pub fn new(tab: CommandTab, commands: Vec<Command>) -> Self {
        Self { tab, commands }
    }

    pub fn find(&self, id: u32) -> Result<&Command, CatalogError> {
        self.commands
            .iter()
            .find(|command| command.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn filter(&self, query: &str) -> Vec<&Command> {
        search::filter_commands(&self.commands, query)
    }
}

/// Path of the catalog document for `tab` inside `dir`.
pub fn catalog_path(dir: &Path, tab: CommandTab) -> PathBuf {
    dir.join(format!("{}.json", tab.file_stem()))
}

/// Reads and parses `<dir>/<tab>.json`, logging any audit findings.
pub fn load_catalog(dir: &Path, tab: CommandTab) -> Result<CommandCatalog, CatalogError> {
    let path = catalog_path(dir, tab);
    log::debug!("Loading {} catalog from '{}'", tab, path.display());

    let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.clone(),
        source,
    })?;
    let commands =
        parse_catalog(&content).map_err(|source| CatalogError::Parse { path, source })?;

    for warning in audit(&commands) {
        log::warn!("[{}] {}", tab, warning);
    }
    log::debug!("Loaded {} command(s) for tab {}", commands.len(), tab);

    Ok(CommandCatalog::new(tab, commands))
}

// --- AUDIT ---

/// A consistency problem found in a catalog. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    DuplicateId { id: u32 },
    DanglingOptionSet { command: u32, key: String, set: u32 },
    EmptySelect { command: u32, key: String },
    UnsupportedType { command: u32, key: String },
    UnreachableToken { command: u32, token: String },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "command id {} is declared more than once", id),
            Self::DanglingOptionSet { command, key, set } => write!(
                f,
                "command {}: argument '{}' references missing option set {}",
                command, key, set
            ),
            Self::EmptySelect { command, key } => {
                write!(f, "command {}: select argument '{}' has no options", command, key)
            }
            Self::UnsupportedType { command, key } => write!(
                f,
                "command {}: argument '{}' has an unsupported type and will render empty",
                command, key
            ),
            Self::UnreachableToken { command, token } => write!(
                f,
                "command {}: token <{}> has no argument that can fill it",
                command, token
            ),
        }
    }
}

/// Checks a parsed catalog for the inconsistencies that resolution silently tolerates.
pub fn audit(commands: &[Command]) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();

    for command in commands {
        if !seen_ids.insert(command.id) {
            warnings.push(CatalogWarning::DuplicateId { id: command.id });
        }

        let mut reachable: HashSet<&str> = HashSet::new();
        for arg in &command.args {
            reachable.insert(arg.key.as_str());
            match &arg.kind {
                ArgumentKind::Select { options } => {
                    if let OptionSource::SetRef(set) = options
                        && !command.data.iter().any(|s| s.id == *set)
                    {
                        warnings.push(CatalogWarning::DanglingOptionSet {
                            command: command.id,
                            key: arg.key.clone(),
                            set: *set,
                        });
                        continue;
                    }
                    let resolved = resolver::resolve_options(command, arg);
                    if resolved.is_empty() {
                        warnings.push(CatalogWarning::EmptySelect {
                            command: command.id,
                            key: arg.key.clone(),
                        });
                    }
                    for option in resolved {
                        reachable.extend(option.args.iter().map(|a| a.key.as_str()));
                    }
                }
                ArgumentKind::Unsupported => warnings.push(CatalogWarning::UnsupportedType {
                    command: command.id,
                    key: arg.key.clone(),
                }),
                _ => {}
            }
        }

        for token in template::extract_placeholders(&command.command) {
            if !reachable.contains(token.as_str()) {
                warnings.push(CatalogWarning::UnreachableToken {
                    command: command.id,
                    token,
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE_GC: &str = include_str!("../../data/commands/gc.json");

    #[test]
    fn test_bundled_catalog_parses_and_is_clean() {
        let commands = parse_catalog(SAMPLE_GC).unwrap();
        assert!(!commands.is_empty());
        assert!(audit(&commands).is_empty());
    }

    #[test]
    fn test_load_catalog_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("gio.json"),
            r#"[{"id": 1, "name": "Heal", "command": "/heal"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(dir.path(), CommandTab::Gio).unwrap();
        assert_eq!(catalog.tab, CommandTab::Gio);
        assert_eq!(catalog.find(1).unwrap().name, "Heal");
        assert!(matches!(catalog.find(2), Err(CatalogError::NotFound(2))));
        assert_eq!(catalog.filter("HEAL").len(), 1);
    }

    #[test]
    fn test_load_catalog_errors() {
        let dir = tempdir().unwrap();
        let missing = load_catalog(dir.path(), CommandTab::Lc).unwrap_err();
        assert!(matches!(missing, CatalogError::Io { .. }));

        fs::write(dir.path().join("lc.json"), "{ not json").unwrap();
        let broken = load_catalog(dir.path(), CommandTab::Lc).unwrap_err();
        assert!(matches!(broken, CatalogError::Parse { ref path, .. } if path.ends_with("lc.json")));
    }

    #[test]
    fn test_malformed_arguments_do_not_break_the_catalog() {
        let commands = parse_catalog(
            r#"[
                {"id": 1, "name": "Heal", "command": "/heal"},
                {"id": 2, "name": "Spawn", "command": "/spawn <monster> <level>", "args": [
                    {"key": "monster", "name": "Monster"},
                    {"key": "level", "type": "number", "limit": {"min": 0.5, "max": 90}}
                ]},
                {"id": 3, "name": "Weather", "command": "/weather <w>", "args": [
                    {"key": "w", "type": "select", "options": null}
                ]}
            ]"#,
        )
        .unwrap();

        let catalog = CommandCatalog::new(CommandTab::Gc, commands);
        assert_eq!(catalog.find(1).unwrap().command, "/heal");
        assert_eq!(catalog.find(2).unwrap().args.len(), 2);
        assert_eq!(
            audit(&catalog.commands),
            vec![
                CatalogWarning::UnsupportedType {
                    command: 2,
                    key: "monster".to_string()
                },
                CatalogWarning::EmptySelect {
                    command: 3,
                    key: "w".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_audit_reports_every_kind_of_problem() {
        let commands = parse_catalog(
            r#"[
                {"id": 1, "name": "a", "command": "/a <mode> <extra> <ghost>", "args": [
                    {"key": "mode", "type": "select", "options": [
                        {"value": "x", "args": [{"key": "extra", "type": "string"}]}
                    ]},
                    {"key": "set", "type": "select", "options": 9},
                    {"key": "empty", "type": "select"},
                    {"key": "colour", "type": "colour"}
                ]},
                {"id": 1, "name": "b", "command": "/b"}
            ]"#,
        )
        .unwrap();

        let warnings = audit(&commands);
        assert_eq!(
            warnings,
            vec![
                CatalogWarning::DanglingOptionSet {
                    command: 1,
                    key: "set".to_string(),
                    set: 9
                },
                CatalogWarning::EmptySelect {
                    command: 1,
                    key: "empty".to_string()
                },
                CatalogWarning::UnsupportedType {
                    command: 1,
                    key: "colour".to_string()
                },
                CatalogWarning::UnreachableToken {
                    command: 1,
                    token: "ghost".to_string()
                },
                CatalogWarning::DuplicateId { id: 1 },
            ]
        );
        assert!(warnings[3].to_string().contains("<ghost>"));
    }
}
