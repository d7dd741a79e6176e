use super::AttributeStore;
use crate::error::{Result, WidgetKvError};
use crate::model::{AttributeMap, Scope};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DOCUMENT: &str = "attributes.json";

pub struct FileStore {
    project_root: Option<PathBuf>,
    global_root: PathBuf,
    document: String,
}

impl FileStore {
    pub fn new(project_root: Option<PathBuf>, global_root: PathBuf) -> Self {
        Self {
            project_root,
            global_root,
            document: DEFAULT_DOCUMENT.to_string(),
        }
    }

    pub fn with_document(mut self, name: &str) -> Self {
        self.document = name.to_string();
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    fn get_store_path(&self, scope: Scope) -> Result<PathBuf> {
        let root = match scope {
            Scope::Project => self.project_root.as_ref().ok_or_else(|| {
                WidgetKvError::Store("No project scope available".to_string())
            })?,
            Scope::Global => &self.global_root,
        };
        Ok(root.clone())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

impl AttributeStore for FileStore {
    fn load(&self, scope: Scope) -> Result<AttributeMap> {
        let path = self.document_path(scope)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no attribute document yet");
            return Ok(AttributeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(AttributeMap::new());
        }
        let map: AttributeMap = serde_json::from_str(&content).map_err(|e| {
            WidgetKvError::Store(format!("Cannot read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), lists = map.len(), "loaded attribute document");
        Ok(map)
    }

    fn save(&mut self, scope: Scope, map: &AttributeMap) -> Result<()> {
        let root = self.get_store_path(scope)?;
        self.ensure_dir(&root)?;

        let path = root.join(&self.document);
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), lists = map.len(), "saved attribute document");
        Ok(())
    }

    fn document_path(&self, scope: Scope) -> Result<PathBuf> {
        Ok(self.get_store_path(scope)?.join(&self.document))
    }
}
