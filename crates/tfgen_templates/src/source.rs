//! Template lookup.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::TemplateResult;

/// Template group holding provider-agnostic templates.
pub const GENERIC_GROUP: &str = "generic";

/// Identifies one template: a group (`generic` or a provider name) and a
/// file name inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId {
    pub group: String,
    pub name: String,
}

impl TemplateId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(GENERIC_GROUP, name)
    }

    /// Parse the `<group>/<name>` form used inside the engine.
    pub fn parse(qualified: &str) -> Option<Self> {
        let (group, name) = qualified.split_once('/')?;
        if group.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(group, name))
    }

    pub fn qualified(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

/// Resolves template ids to template text.
pub trait TemplateSource: Send + Sync {
    /// Return the template text, or `None` if the template does not exist.
    fn load(&self, id: &TemplateId) -> TemplateResult<Option<String>>;
}

/// Templates stored on disk as `<root>/<group>/<name>`.
#[derive(Debug, Clone)]
pub struct DirTemplateSource {
    root: PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every template under the root, sorted.
    pub fn list(&self) -> Vec<TemplateId> {
        let mut ids = Vec::new();

        if !self.root.exists() {
            warn!("Templates directory does not exist: {:?}", self.root);
            return ids;
        }

        for entry in WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let group = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|g| g.to_string_lossy().to_string());
            if let Some(group) = group {
                ids.push(TemplateId::new(group, entry.file_name().to_string_lossy()));
            }
        }

        ids.sort_by_key(|id| id.qualified());
        ids
    }

    fn path_for(&self, id: &TemplateId) -> Option<PathBuf> {
        // Reject anything that could escape the root.
        let safe = |part: &str| !part.contains(['/', '\\']) && part != ".." && part != ".";
        if safe(&id.group) && safe(&id.name) {
            Some(self.root.join(&id.group).join(&id.name))
        } else {
            None
        }
    }
}

impl TemplateSource for DirTemplateSource {
    fn load(&self, id: &TemplateId) -> TemplateResult<Option<String>> {
        let path = match self.path_for(id) {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.is_file() {
            return Ok(None);
        }
        debug!("Loading template {} from {:?}", id, path);
        Ok(Some(fs::read_to_string(path)?))
    }
}

/// Templates held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateSource {
    templates: HashMap<TemplateId, String>,
}

impl MemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TemplateId, source: impl Into<String>) {
        self.templates.insert(id, source.into());
    }

    pub fn with_template(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.insert(TemplateId::new(group, name), source);
        self
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn load(&self, id: &TemplateId) -> TemplateResult<Option<String>> {
        Ok(self.templates.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_template_id_parse() {
        let id = TemplateId::parse("aws/main.tf.tmpl").unwrap();
        assert_eq!(id, TemplateId::new("aws", "main.tf.tmpl"));
        assert_eq!(id.qualified(), "aws/main.tf.tmpl");
        assert!(TemplateId::parse("main.tf.tmpl").is_none());
        assert!(TemplateId::parse("/main.tf.tmpl").is_none());
    }

    #[test]
    fn test_dir_source_load_and_list() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("generic")).unwrap();
        fs::create_dir_all(temp.path().join("aws")).unwrap();
        fs::write(temp.path().join("generic/providers.tf.tmpl"), "terraform {}").unwrap();
        fs::write(temp.path().join("aws/main.tf.tmpl"), "# aws").unwrap();

        let source = DirTemplateSource::new(temp.path());
        let loaded = source.load(&TemplateId::generic("providers.tf.tmpl")).unwrap();
        assert_eq!(loaded.as_deref(), Some("terraform {}"));
        assert!(source.load(&TemplateId::new("google", "main.tf.tmpl")).unwrap().is_none());

        let listed: Vec<_> = source.list().iter().map(|id| id.qualified()).collect();
        assert_eq!(listed, vec!["aws/main.tf.tmpl", "generic/providers.tf.tmpl"]);
    }

    #[test]
    fn test_dir_source_rejects_traversal() {
        let temp = tempdir().unwrap();
        let source = DirTemplateSource::new(temp.path().join("templates"));
        assert!(source.load(&TemplateId::new("..", "Cargo.toml")).unwrap().is_none());
    }

    #[test]
    fn test_dir_source_missing_root() {
        let temp = tempdir().unwrap();
        let source = DirTemplateSource::new(temp.path().join("absent"));
        assert!(source.list().is_empty());
    }
}
