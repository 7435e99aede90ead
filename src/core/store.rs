use crate::core::loader::DataRoot;
use crate::domain::common::CommonData;
use crate::domain::data_paths::DataPaths;
use crate::domain::edition::Edition;
use crate::domain::mcdata::MinecraftData;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type VersionKey = (Edition, String);

/// Shared, lazily filled cache over a [`DataRoot`].
///
/// A version is cached after its first successful load until
/// [`DataStore::clear`], and later requests get the same `Arc` back. Threads
/// that miss the cache together may each load it; the first insert wins.
#[derive(Debug)]
pub struct DataStore {
    root: DataRoot,
    data_paths: RwLock<Option<Arc<DataPaths>>>,
    common: RwLock<HashMap<Edition, Arc<CommonData>>>,
    versions: RwLock<HashMap<VersionKey, Arc<MinecraftData>>>,
}

impl DataStore {
    pub fn new(root: DataRoot) -> Self {
        Self {
            root,
            data_paths: RwLock::new(None),
            common: RwLock::new(HashMap::new()),
            versions: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &DataRoot {
        &self.root
    }

    pub fn data_paths(&self) -> Result<Arc<DataPaths>> {
        if let Some(cached) = self
            .data_paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(self.root.load_data_paths()?);
        let mut slot = self.data_paths.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(slot.get_or_insert(loaded)))
    }

    pub fn common_data(&self, edition: Edition) -> Result<Arc<CommonData>> {
        if let Some(cached) = self
            .common
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&edition)
        {
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(self.root.load_common_data(edition)?);
        let mut common = self.common.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(common.entry(edition).or_insert(loaded)))
    }

    pub fn supported_versions(&self, edition: Edition) -> Result<Vec<String>> {
        let common = self.common_data(edition)?;
        let data_paths = self.data_paths()?;
        self.root.check_versions(&data_paths, &common, edition)?;
        Ok(common.versions.clone())
    }

    pub fn version(&self, edition: Edition, version: &str) -> Result<Arc<MinecraftData>> {
        let key = (edition, version.to_string());
        if let Some(cached) = self
            .versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::debug!("Cache hit for {} {}", edition, version);
            return Ok(Arc::clone(cached));
        }

        let data_paths = self.data_paths()?;
        let loaded = Arc::new(self.root.load_version_with(&data_paths, version, edition)?);

        // A concurrent loader may have won; keep the first entry.
        let mut versions = self.versions.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(versions.entry(key).or_insert(loaded)))
    }

    pub fn cached_versions(&self) -> usize {
        self.versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.data_paths
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.common
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.versions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MinebaseError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_errors_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(DataRoot::new(dir.path()));

        assert!(matches!(
            store.version(Edition::Pc, "1.8"),
            Err(MinebaseError::DataRootUninitialized { .. })
        ));
        assert_eq!(store.cached_versions(), 0);

        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/dataPaths.json"),
            r#"{"pc": {}, "bedrock": {}}"#,
        )
        .unwrap();
        assert!(matches!(
            store.version(Edition::Pc, "1.8"),
            Err(MinebaseError::UnknownVersion { .. })
        ));
        assert!(store.data_paths().unwrap().pc.is_empty());
    }

    #[test]
    fn test_clear_drops_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        let manifest = dir.path().join("data/dataPaths.json");
        fs::write(&manifest, r#"{"pc": {}, "bedrock": {}}"#).unwrap();

        let store = DataStore::new(DataRoot::new(dir.path()));
        let first = store.data_paths().unwrap();
        assert!(Arc::ptr_eq(&first, &store.data_paths().unwrap()));

        fs::write(&manifest, r#"{"pc": {"1.8": {}}, "bedrock": {}}"#).unwrap();
        assert!(store.data_paths().unwrap().pc.is_empty());

        store.clear();
        assert_eq!(store.data_paths().unwrap().pc.len(), 1);
    }
}
