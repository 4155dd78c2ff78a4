//! Storage for persisted variable layers
//!
//! The resolver only needs [`SecretStore`]; how secrets are kept is up to
//! the implementation. Two are provided: [`FileSecretStore`] (one JSON file
//! per collection/environment) and [`MemorySecretStore`].

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::scope::{LayerKind, VariableMap};
use crate::errors::{CurlbridgeError, Result};

/// An inline collection variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The collection a request belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Environment whose secrets apply on top of the collection's
    #[serde(default)]
    pub environment_id: Option<String>,
}

impl Collection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push(Variable::new(key, value));
        self
    }

    pub fn with_environment(mut self, environment_id: impl Into<String>) -> Self {
        self.environment_id = Some(environment_id.into());
        self
    }

    /// Inline variables as a map; variables with an empty key are skipped
    pub fn inline_variables(&self) -> VariableMap {
        self.variables
            .iter()
            .filter(|v| !v.key.is_empty())
            .map(|v| (v.key.clone(), v.value.clone()))
            .collect()
    }

    /// Load a collection description from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CurlbridgeError::Storage(format!("Failed to read collection {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| CurlbridgeError::Storage(format!("Failed to parse collection {}: {}", path.display(), e)))
    }
}

/// Persisted secrets, looked up per collection and per environment
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn collection_secrets(&self, collection_id: &str) -> Result<VariableMap>;

    async fn environment_secrets(&self, environment_id: &str) -> Result<VariableMap>;
}

/// Secrets stored as flat JSON objects under a root directory
///
/// ```text
/// <root>/collections/<collection id>.json
/// <root>/environments/<environment id>.json
/// ```
///
/// A missing file is an empty layer. Values are stored in plaintext.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    root: PathBuf,
}

impl FileSecretStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn layer_path(&self, kind: LayerKind, id: &str) -> PathBuf {
        let dir = match kind {
            LayerKind::EnvironmentSecrets => "environments",
            _ => "collections",
        };
        self.root.join(dir).join(format!("{}.json", sanitize_id(id)))
    }

    async fn load(&self, kind: LayerKind, id: &str) -> Result<VariableMap> {
        let path = self.layer_path(kind, id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(VariableMap::new()),
            Err(e) => {
                return Err(CurlbridgeError::Storage(format!("Failed to read {}: {}", path.display(), e)));
            }
        };
        serde_json::from_str(&content)
            .map_err(|e| CurlbridgeError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Write a layer atomically (temp file in the same directory, then rename)
    fn save(&self, kind: LayerKind, id: &str, vars: &VariableMap) -> Result<()> {
        let path = self.layer_path(kind, id);
        let dir = path
            .parent()
            .ok_or_else(|| CurlbridgeError::Storage(format!("Invalid secrets path: {}", path.display())))?;
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(vars)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|e| CurlbridgeError::Storage(format!("Failed to write {}: {}", path.display(), e.error)))?;
        Ok(())
    }

    pub fn save_collection_secrets(&self, collection_id: &str, vars: &VariableMap) -> Result<()> {
        self.save(LayerKind::CollectionSecrets, collection_id, vars)
    }

    pub fn save_environment_secrets(&self, environment_id: &str, vars: &VariableMap) -> Result<()> {
        self.save(LayerKind::EnvironmentSecrets, environment_id, vars)
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn collection_secrets(&self, collection_id: &str) -> Result<VariableMap> {
        self.load(LayerKind::CollectionSecrets, collection_id).await
    }

    async fn environment_secrets(&self, environment_id: &str) -> Result<VariableMap> {
        self.load(LayerKind::EnvironmentSecrets, environment_id).await
    }
}

fn poisoned<T>(_: T) -> CurlbridgeError {
    CurlbridgeError::Storage("secret store lock poisoned".to_string())
}

/// Keep ids usable as a single file name
fn sanitize_id(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "_".to_string(),
        name => name.to_string(),
    }
}

/// In-process secret store
///
/// Lookups of ids marked with [`fail_collection`](Self::fail_collection) or
/// [`fail_environment`](Self::fail_environment) return a storage error.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    collections: RwLock<HashMap<String, VariableMap>>,
    environments: RwLock<HashMap<String, VariableMap>>,
    failing: RwLock<HashSet<(LayerKind, String)>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_collection_secret(&self, collection_id: &str, key: &str, value: &str) {
        if let Ok(mut map) = self.collections.write() {
            map.entry(collection_id.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
    }

    pub fn set_environment_secret(&self, environment_id: &str, key: &str, value: &str) {
        if let Ok(mut map) = self.environments.write() {
            map.entry(environment_id.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
    }

    pub fn fail_collection(&self, collection_id: &str) {
        self.mark_failing(LayerKind::CollectionSecrets, collection_id);
    }

    pub fn fail_environment(&self, environment_id: &str) {
        self.mark_failing(LayerKind::EnvironmentSecrets, environment_id);
    }

    fn mark_failing(&self, kind: LayerKind, id: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert((kind, id.to_string()));
        }
    }

    fn lookup(&self, kind: LayerKind, id: &str) -> Result<VariableMap> {
        if self.failing.read().map_err(poisoned)?.contains(&(kind, id.to_string())) {
            return Err(CurlbridgeError::Storage(format!("{} unavailable for {}", kind, id)));
        }
        let layers = match kind {
            LayerKind::EnvironmentSecrets => &self.environments,
            _ => &self.collections,
        };
        Ok(layers.read().map_err(poisoned)?.get(id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn collection_secrets(&self, collection_id: &str) -> Result<VariableMap> {
        self.lookup(LayerKind::CollectionSecrets, collection_id)
    }

    async fn environment_secrets(&self, environment_id: &str) -> Result<VariableMap> {
        self.lookup(LayerKind::EnvironmentSecrets, environment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("col-1"), "col-1");
        assert_eq!(sanitize_id("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_id(".."), "_");
        assert_eq!(sanitize_id(""), "_");
    }

    #[test]
    fn test_inline_variables_skip_empty_keys() {
        let collection = Collection::new("c").with_variable("a", "1").with_variable("", "x");
        let vars = collection.inline_variables();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["a"], "1");
    }

    #[test]
    fn test_collection_json() {
        let collection: Collection = serde_json::from_str(
            r#"{"id": "c1", "variables": [{"key": "base", "value": "https://api.test"}], "environmentId": "prod"}"#,
        )
        .unwrap();
        assert_eq!(collection.environment_id.as_deref(), Some("prod"));
        assert_eq!(collection.variables[0], Variable::new("base", "https://api.test"));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileSecretStore::new(dir.path());

        let mut vars = VariableMap::new();
        vars.insert("token".to_string(), "abc".to_string());
        store.save_environment_secrets("prod", &vars).unwrap();

        assert_eq!(store.environment_secrets("prod").await.unwrap(), vars);
        assert!(store.collection_secrets("prod").await.unwrap().is_empty());
        assert!(dir.path().join("environments").join("prod.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("collections")).unwrap();
        std::fs::write(dir.path().join("collections").join("c1.json"), "not json").unwrap();

        let store = FileSecretStore::new(dir.path());
        let err = store.collection_secrets("c1").await.unwrap_err();
        assert!(matches!(err, CurlbridgeError::Storage(_)));
    }

    #[tokio::test]
    async fn test_memory_store_failures() {
        let store = MemorySecretStore::new();
        store.set_collection_secret("c1", "a", "1");
        assert_eq!(store.collection_secrets("c1").await.unwrap()["a"], "1");

        store.fail_collection("c1");
        assert!(store.collection_secrets("c1").await.is_err());
        assert!(store.environment_secrets("c1").await.unwrap().is_empty());
    }
}
