use std::{collections::BTreeMap, path::{Path, PathBuf}, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

#[derive(Serialize, Deserialize)]
struct TableState<V> {
    next_id: i32,
    rows: BTreeMap<i32, V>,
}

impl<V> Default for TableState<V> {
    fn default() -> Self { Self { next_id: 1, rows: BTreeMap::new() } }
}

/// Integer-keyed table with an auto-increment sequence.
///
/// Rows live in memory behind an async `RwLock`. When opened from a path the
/// whole table (rows and sequence) is rewritten to a JSON file after every
/// mutation, while the write lock is still held.
#[derive(Clone)]
pub struct JsonTable<V> {
    inner: Arc<RwLock<TableState<V>>>,
    file_path: Option<PathBuf>,
}

impl<V> JsonTable<V>
where
    V: Serialize + DeserializeOwned + Clone,
{
    /// A table that is never written to disk.
    pub fn in_memory() -> Self {
        Self { inner: Arc::new(RwLock::new(TableState::default())), file_path: None }
    }

    /// Load the table from a path. Creates the file with an empty table if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let state: TableState<V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Db(format!("corrupt table file {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = TableState::default();
                write_state(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Db(format!("read table file {}: {e}", file_path.display()))),
        };
        debug!(path = %file_path.display(), rows = state.rows.len(), next_id = state.next_id, "json table loaded");

        Ok(Self { inner: Arc::new(RwLock::new(state)), file_path: Some(file_path) })
    }

    async fn persist(&self, state: &TableState<V>) -> Result<(), ServiceError> {
        match &self.file_path {
            Some(path) => write_state(path, state).await,
            None => Ok(()),
        }
    }

    /// All rows in ascending id order.
    pub async fn list(&self) -> Vec<V> {
        let state = self.inner.read().await;
        state.rows.values().cloned().collect()
    }

    pub async fn get(&self, id: i32) -> Option<V> {
        let state = self.inner.read().await;
        state.rows.get(&id).cloned()
    }

    /// Insert or replace a row and persist.
    ///
    /// With `None` the next sequence value is used. An explicit id at or past
    /// the sequence moves the sequence beyond it, so generated ids never collide
    /// with rows written under caller-chosen ids. A failed write leaves the
    /// table unchanged.
    pub async fn upsert_with<F>(&self, id: Option<i32>, build: F) -> Result<V, ServiceError>
    where
        F: FnOnce(i32) -> V,
    {
        let mut state = self.inner.write().await;
        let prev_next_id = state.next_id;
        let id = id.unwrap_or(state.next_id);
        if id >= state.next_id {
            state.next_id = id
                .checked_add(1)
                .ok_or_else(|| ServiceError::Db("id sequence exhausted".into()))?;
        }
        let row = build(id);
        let prev_row = state.rows.insert(id, row.clone());
        if let Err(e) = self.persist(&state).await {
            match prev_row {
                Some(old) => state.rows.insert(id, old),
                None => state.rows.remove(&id),
            };
            state.next_id = prev_next_id;
            return Err(e);
        }
        Ok(row)
    }

    /// Remove a row and persist; returns whether it existed. A failed write
    /// puts the row back.
    pub async fn remove(&self, id: i32) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        let Some(old) = state.rows.remove(&id) else { return Ok(false) };
        if let Err(e) = self.persist(&state).await {
            state.rows.insert(id, old);
            return Err(e);
        }
        Ok(true)
    }
}

/// Write to a sibling temp file, then rename it over `path`.
async fn write_state<V: Serialize>(path: &Path, state: &TableState<V>) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(state).map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    fs::rename(&tmp, path).await.map_err(|e| ServiceError::Db(e.to_string()))
}
