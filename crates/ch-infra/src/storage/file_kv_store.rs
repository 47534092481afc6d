use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ch_core::ports::KeyValueStorePort;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

/// Key-value store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so the file on disk is always either the previous or the new
/// document. Writes are serialized by an internal lock.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// `Ok(None)` when the file does not exist yet.
    async fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read store failed: {}", self.path.display()))
            }
        };

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parse store failed: {}", self.path.display()))?;
        match value {
            Value::Object(map) => Ok(Some(map)),
            other => anyhow::bail!(
                "store root must be an object, found {}: {}",
                json_type_name(&other),
                self.path.display()
            ),
        }
    }

    async fn atomic_write(&self, document: &Map<String, Value>) -> Result<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(document).context("serialize store failed")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Current document for a read-modify-write. An unreadable document is
    /// replaced rather than blocking every future write.
    async fn document_for_update(&self) -> Map<String, Value> {
        match self.read_document().await {
            Ok(document) => document.unwrap_or_default(),
            Err(err) => {
                warn!(
                    error = %format!("{err:#}"),
                    "Existing store is unreadable, starting a fresh document"
                );
                Map::new()
            }
        }
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let document = self.read_document().await?;
        Ok(document.and_then(|mut map| map.remove(key)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.document_for_update().await;
        document.insert(key.to_string(), value);
        self.atomic_write(&document).await
    }

    async fn set_many(&self, values: Vec<(String, Value)>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.document_for_update().await;
        document.extend(values);
        self.atomic_write(&document).await
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("nested").join("history.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("history.max_items").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_survives_a_new_instance() {
        let dir = TempDir::new().unwrap();
        store_in(&dir)
            .set("history.max_items", json!(42))
            .await
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("history.max_items").await.unwrap(),
            Some(json!(42))
        );
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn set_keeps_other_slots() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("a", json!(1)).await.unwrap();
        store.set("b", json!("two")).await.unwrap();
        store
            .set_many(vec![("a".into(), json!(3)), ("c".into(), json!([]))])
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(json!(3)));
        assert_eq!(store.get("b").await.unwrap(), Some(json!("two")));
        assert_eq!(store.get("c").await.unwrap(), Some(json!([])));
    }

    #[tokio::test]
    async fn corrupt_file_fails_reads_but_not_writes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.get("anything").await.is_err());

        store.set("history.auto_paste", json!(true)).await.unwrap();
        assert_eq!(
            store.get("history.auto_paste").await.unwrap(),
            Some(json!(true))
        );
    }

    #[tokio::test]
    async fn non_object_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "[1, 2, 3]").unwrap();

        let err = store.get("x").await.unwrap_err();
        assert!(format!("{err:#}").contains("array"));
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_lose_slots() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.set(&format!("slot.{i}"), json!(i)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..16 {
            assert_eq!(
                store.get(&format!("slot.{i}")).await.unwrap(),
                Some(json!(i))
            );
        }
    }
}
