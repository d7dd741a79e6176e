use crate::api::{WidgetKvApi, WidgetKvPaths};
use crate::config::WidgetKvConfig;
use crate::error::{Result, WidgetKvError};
use crate::model::Scope;
use crate::store::fs::FileStore;
use directories::{BaseDirs, ProjectDirs};
use std::env;
use std::path::{Path, PathBuf};

const STORE_DIR: &str = ".widgetkv";

/// Overrides the global data directory (used by tests and CI).
pub const HOME_ENV: &str = "WIDGETKV_HOME";

pub struct WidgetKvContext {
    pub api: WidgetKvApi<FileStore>,
    pub scope: Scope,
    pub config: WidgetKvConfig,
}

/// Find the project root by walking up from cwd looking for a directory
/// that has both .git and .widgetkv. A directory with .git but no .widgetkv
/// does not stop the search, so nested repos share their parent's store.
/// Returns None when home or the filesystem root is reached first.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(".git").exists() && current.join(STORE_DIR).exists() {
            return Some(current);
        }

        if home_dir.as_ref() == Some(&current) {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

fn global_data_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "widgetkv", "widgetkv")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| WidgetKvError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(cwd: &Path, use_global: bool) -> Result<WidgetKvContext> {
    let project_dir = find_project_root(cwd)
        .map(|root| root.join(STORE_DIR))
        .unwrap_or_else(|| cwd.join(STORE_DIR));
    let global_dir = global_data_dir()?;

    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Project
    };

    let config_dir = match scope {
        Scope::Project => &project_dir,
        Scope::Global => &global_dir,
    };
    let config = match WidgetKvConfig::load(config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
            WidgetKvConfig::default()
        }
    };
    tracing::debug!(
        ?scope,
        project = %project_dir.display(),
        global = %global_dir.display(),
        "initialized context"
    );

    let store = FileStore::new(Some(project_dir.clone()), global_dir.clone())
        .with_document(&config.document);
    let paths = WidgetKvPaths {
        project: Some(project_dir),
        global: global_dir,
    };
    let api = WidgetKvApi::new(store, paths, config.clone());

    Ok(WidgetKvContext { api, scope, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_with_git_and_store() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::create_dir(root.join(STORE_DIR)).unwrap();

        assert_eq!(find_project_root(root), Some(root.to_path_buf()));
    }

    #[test]
    fn test_find_project_root_git_only_continues_up() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path();
        let child = parent.join("child-repo");

        fs::create_dir(&child).unwrap();
        fs::create_dir(parent.join(".git")).unwrap();
        fs::create_dir(parent.join(STORE_DIR)).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        assert_eq!(find_project_root(&child), Some(parent.to_path_buf()));
    }

    #[test]
    fn test_find_project_root_deep_nested() {
        let temp = TempDir::new().unwrap();
        let grandparent = temp.path();
        let child = grandparent.join("parent").join("child");

        fs::create_dir_all(&child).unwrap();
        fs::create_dir(grandparent.join(".git")).unwrap();
        fs::create_dir(grandparent.join(STORE_DIR)).unwrap();

        assert_eq!(find_project_root(&child), Some(grandparent.to_path_buf()));
    }

    #[test]
    fn test_find_project_root_store_without_git() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join(STORE_DIR)).unwrap();

        assert_eq!(find_project_root(root), None);
    }

    #[test]
    fn test_initialize_falls_back_to_cwd_store() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path(), false).unwrap();

        assert_eq!(ctx.scope, Scope::Project);
        assert_eq!(
            ctx.api.paths().project,
            Some(temp.path().join(STORE_DIR))
        );
        assert_eq!(
            ctx.api.document_path(Scope::Project).unwrap(),
            temp.path().join(STORE_DIR).join("attributes.json")
        );
    }

    #[test]
    fn test_initialize_reads_project_config() {
        let temp = TempDir::new().unwrap();
        let mut config = WidgetKvConfig::default();
        config.set("document", "widgets.json").unwrap();
        config.save(temp.path().join(STORE_DIR)).unwrap();

        let ctx = initialize(temp.path(), false).unwrap();
        assert_eq!(ctx.config.document, "widgets.json");
        assert_eq!(
            ctx.api.document_path(Scope::Project).unwrap(),
            temp.path().join(STORE_DIR).join("widgets.json")
        );
    }
}
