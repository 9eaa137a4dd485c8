use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// JSON file-backed document collection.
///
/// Keeps a `HashMap<K, V>` behind an async `RwLock` and rewrites the file
/// after every successful mutation. Reads never touch the filesystem.
/// Intended for small single-collection workloads where a database is
/// overkill.
pub struct JsonCollection<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonCollection<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned + Clone,
    V: Serialize + DeserializeOwned + Clone,
{
    /// Open the collection at `path`, creating an empty file when missing.
    /// A file that exists but does not parse is an error, not a silent reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt collection file: {e}")))?,
            Err(_) => HashMap::new(),
        };

        let collection = Arc::new(Self { inner: RwLock::new(map), file_path });
        collection.flush().await?;
        Ok(collection)
    }

    async fn flush(&self) -> Result<(), ServiceError> {
        let map = self.inner.read().await;
        let bytes = serde_json::to_vec_pretty(&*map)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        drop(map);
        fs::write(&self.file_path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// All entries as `(key, value)` pairs, in map order.
    pub async fn snapshot(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// An arbitrary value, `None` when the collection is empty.
    pub async fn first(&self) -> Option<V> {
        let map = self.inner.read().await;
        map.values().next().cloned()
    }

    pub async fn len(&self) -> usize {
        let map = self.inner.read().await;
        map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove a key and persist; reports whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        self.mutate(|map| Ok(map.remove(key).is_some())).await
    }

    /// Drop every entry and persist the empty map.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.mutate(|map| {
            map.clear();
            Ok(())
        })
        .await
    }

    /// Apply a mutation to the map and persist it atomically.
    ///
    /// The write lock is held across the file write, so the file always
    /// reflects the newest map state and two mutations can never land their
    /// bytes out of order. A closure error leaves both map and file
    /// untouched.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<T, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let out = f(&mut map)?;
        let bytes = serde_json::to_vec_pretty(&*map)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(out)
    }

    /// Explicit shutdown point. Mutations persist eagerly, so this is a final
    /// flush rather than a correctness requirement.
    pub async fn close(&self) -> Result<(), ServiceError> {
        self.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store_path;

    #[tokio::test]
    async fn collection_crud_persists() -> Result<(), anyhow::Error> {
        let path = temp_store_path("json_collection");
        let coll = JsonCollection::<String, u32>::open(&path).await?;

        assert!(coll.is_empty().await);
        assert!(coll.first().await.is_none());

        coll.mutate(|map| {
            map.insert("a".into(), 1);
            map.insert("b".into(), 2);
            Ok(())
        })
        .await?;
        assert_eq!(coll.len().await, 2);
        assert_eq!(coll.get(&"a".into()).await, Some(1));
        assert!(coll.first().await.is_some());

        let existed = coll.remove(&"b".into()).await?;
        assert!(existed);
        let existed = coll.remove(&"b".into()).await?;
        assert!(!existed);

        // reload from disk and observe the same state
        coll.close().await?;
        let reloaded = JsonCollection::<String, u32>::open(&path).await?;
        assert_eq!(reloaded.len().await, 1);
        assert_eq!(reloaded.get(&"a".into()).await, Some(1));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_changes_nothing() -> Result<(), anyhow::Error> {
        let path = temp_store_path("json_collection_err");
        let coll = JsonCollection::<String, u32>::open(&path).await?;
        coll.mutate(|map| {
            map.insert("keep".into(), 7);
            Ok(())
        })
        .await?;

        let res: Result<(), ServiceError> = coll
            .mutate(|_| Err(ServiceError::NotFound("nope".into())))
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));

        let reloaded = JsonCollection::<String, u32>::open(&path).await?;
        assert_eq!(reloaded.len().await, 1);
        assert_eq!(reloaded.get(&"keep".into()).await, Some(7));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_the_collection() -> Result<(), anyhow::Error> {
        let path = temp_store_path("json_collection_clear");
        let coll = JsonCollection::<String, u32>::open(&path).await?;
        coll.mutate(|map| {
            map.insert("x".into(), 1);
            Ok(())
        })
        .await?;
        coll.clear().await?;
        assert!(coll.is_empty().await);

        let reloaded = JsonCollection::<String, u32>::open(&path).await?;
        assert!(reloaded.is_empty().await);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
