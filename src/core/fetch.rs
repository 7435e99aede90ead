//! Downloads a minecraft-data archive and unpacks its `data/` tree.

use crate::domain::ports::{ArchiveSource, Storage};
use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::path::{Component, Path};
use std::time::Duration;
use zip::ZipArchive;

pub const FETCH_STAMP_FILE: &str = ".minebase-fetch.json";

pub struct HttpArchiveSource {
    client: Client,
    url: String,
}

impl HttpArchiveSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        validate_url("fetch.url", &url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ArchiveSource for HttpArchiveSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn download(&self) -> Result<Vec<u8>> {
        tracing::info!("Downloading {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Archive response status: {}", response.status());

        let bytes = response.error_for_status()?.bytes().await?;
        tracing::info!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Written next to `data/` after a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchStamp {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub file_count: usize,
}

pub struct DataFetcher<S: Storage, A: ArchiveSource> {
    storage: S,
    source: A,
}

impl<S: Storage, A: ArchiveSource> DataFetcher<S, A> {
    pub fn new(storage: S, source: A) -> Self {
        Self { storage, source }
    }

    /// Unpacks `data/` entry by entry; only one decompressed file is held
    /// in memory at a time.
    pub async fn fetch(&self) -> Result<FetchStamp> {
        let archive = self.source.download().await?;
        let mut zip = ZipArchive::new(Cursor::new(archive))?;
        let wrapper = wrapper_dir(&zip);

        let mut file_count = 0;
        for idx in 0..zip.len() {
            let Some((path, contents)) = read_data_entry(&mut zip, idx, wrapper.as_deref())? else {
                continue;
            };
            self.storage.write_file(&path, &contents).await?;
            file_count += 1;
            if file_count % 1000 == 0 {
                tracing::info!("Wrote {} files", file_count);
            }
        }

        if file_count == 0 {
            return Err(MinebaseError::processing(format!(
                "Archive from {} has no data/ entries",
                self.source.describe()
            )));
        }

        let stamp = FetchStamp {
            source: self.source.describe(),
            fetched_at: Utc::now(),
            file_count,
        };
        let stamp_json = serde_json::to_vec_pretty(&stamp)?;
        self.storage.write_file(FETCH_STAMP_FILE, &stamp_json).await?;

        tracing::info!("Fetched {} files from {}", stamp.file_count, stamp.source);
        Ok(stamp)
    }

    /// Reads back the stamp of the last successful fetch, if any.
    pub async fn last_fetch(&self) -> Result<Option<FetchStamp>> {
        match self.storage.read_file(FETCH_STAMP_FILE).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(MinebaseError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// The single top-level directory GitHub wraps archives in (`<repo>-<ref>/`).
/// `None` when entries sit at the root or under more than one directory.
fn wrapper_dir<R: Read + std::io::Seek>(zip: &ZipArchive<R>) -> Option<String> {
    let mut wrapper: Option<&str> = None;
    for name in zip.file_names() {
        let (first, _) = name.split_once('/')?;
        if first.is_empty() {
            return None;
        }
        match wrapper {
            Some(existing) if existing != first => return None,
            Some(_) => {}
            None => wrapper = Some(first),
        }
    }
    wrapper.filter(|dir| *dir != "data").map(str::to_string)
}

/// Reads entry `idx` when it lies below `data/`, returning its path relative
/// to the checkout root. Entries escaping the archive root are skipped.
fn read_data_entry<R: Read + std::io::Seek>(
    zip: &mut ZipArchive<R>,
    idx: usize,
    wrapper: Option<&str>,
) -> Result<Option<(String, Vec<u8>)>> {
    let mut file = zip.by_index(idx)?;
    if file.is_dir() {
        return Ok(None);
    }
    let Some(enclosed) = file.enclosed_name() else {
        tracing::warn!("Skipping unsafe archive entry {}", file.name());
        return Ok(None);
    };
    let Some(relative) = data_relative_path(&enclosed, wrapper) else {
        return Ok(None);
    };

    // The header's declared size is not trusted for preallocation.
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    tracing::debug!("Extracted {} ({} bytes)", relative, contents.len());
    Ok(Some((relative, contents)))
}

fn data_relative_path(path: &Path, wrapper: Option<&str>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            _ => return None,
        }
    }

    if let Some(wrapper) = wrapper {
        if parts.first().map(String::as_str) != Some(wrapper) {
            return None;
        }
        parts.remove(0);
    }
    if parts.len() < 2 || parts[0] != "data" {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{FileOptions, SimpleFileOptions, ZipWriter};

    struct StaticArchive(Vec<u8>);

    #[async_trait]
    impl ArchiveSource for StaticArchive {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        async fn download(&self) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    fn archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_data_relative_path() {
        let wrapper = Some("minecraft-data-master");
        assert_eq!(
            data_relative_path(Path::new("minecraft-data-master/data/pc/1.8/blocks.json"), wrapper),
            Some("data/pc/1.8/blocks.json".to_string())
        );
        assert_eq!(
            data_relative_path(Path::new("data/dataPaths.json"), None),
            Some("data/dataPaths.json".to_string())
        );
        assert_eq!(data_relative_path(Path::new("minecraft-data-master/README.md"), wrapper), None);
        assert_eq!(data_relative_path(Path::new("minecraft-data-master/tools/data/x"), wrapper), None);
        assert_eq!(data_relative_path(Path::new("tools/data/x.json"), None), None);
    }

    #[test]
    fn test_wrapper_dir_detection() {
        let wrapped = ZipArchive::new(Cursor::new(archive(&[
            ("repo-main/README.md", "readme"),
            ("repo-main/data/dataPaths.json", "{}"),
        ])))
        .unwrap();
        assert_eq!(wrapper_dir(&wrapped).as_deref(), Some("repo-main"));

        let unwrapped = ZipArchive::new(Cursor::new(archive(&[
            ("README.md", "readme"),
            ("data/dataPaths.json", "{}"),
        ])))
        .unwrap();
        assert_eq!(wrapper_dir(&unwrapped), None);

        let data_only = ZipArchive::new(Cursor::new(archive(&[("data/dataPaths.json", "{}")]))).unwrap();
        assert_eq!(wrapper_dir(&data_only), None);
    }

    #[tokio::test]
    async fn test_unwrapped_archive_keeps_only_top_level_data() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());
        let source = StaticArchive(archive(&[
            ("data/dataPaths.json", "{}"),
            ("tools/data/generated.json", "[]"),
        ]));

        let stamp = DataFetcher::new(storage, source).fetch().await.unwrap();

        assert_eq!(stamp.file_count, 1);
        assert!(dir.path().join("data/dataPaths.json").is_file());
        assert!(!dir.path().join("data/generated.json").exists());
    }

    #[tokio::test]
    async fn test_fetch_writes_data_tree_and_stamp() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());
        let source = StaticArchive(archive(&[
            ("minecraft-data-master/README.md", "readme"),
            ("minecraft-data-master/data/dataPaths.json", "{}"),
            ("minecraft-data-master/data/pc/common/versions.json", "[]"),
        ]));

        let fetcher = DataFetcher::new(storage, source);
        assert_eq!(fetcher.last_fetch().await.unwrap(), None);
        let stamp = fetcher.fetch().await.unwrap();

        assert_eq!(stamp.file_count, 2);
        assert_eq!(stamp.source, "memory");
        assert_eq!(fetcher.last_fetch().await.unwrap(), Some(stamp.clone()));
        assert!(dir.path().join("data/pc/common/versions.json").is_file());
        assert!(!dir.path().join("README.md").exists());

        let written: FetchStamp =
            serde_json::from_slice(&std::fs::read(dir.path().join(FETCH_STAMP_FILE)).unwrap())
                .unwrap();
        assert_eq!(written, stamp);
    }

    #[tokio::test]
    async fn test_entries_are_written_as_they_are_read() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = || SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("repo-main/data/dataPaths.json", stored()).unwrap();
        zip.write_all(b"{}").unwrap();
        zip.start_file("repo-main/data/pc/common/versions.json", stored()).unwrap();
        zip.write_all(b"CORRUPTED-LATER-PAYLOAD").unwrap();
        let mut bytes = zip.finish().unwrap().into_inner();

        // Break the second entry's checksum.
        let payload = b"CORRUPTED-LATER-PAYLOAD";
        let at = bytes.windows(payload.len()).position(|w| w == payload).unwrap();
        bytes[at] = b'X';

        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());
        let result = DataFetcher::new(storage, StaticArchive(bytes)).fetch().await;

        assert!(result.is_err());
        assert!(dir.path().join("data/dataPaths.json").is_file());
        assert!(!dir.path().join(FETCH_STAMP_FILE).exists());
    }

    #[tokio::test]
    async fn test_archive_without_data_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());
        let source = StaticArchive(archive(&[("repo-main/README.md", "readme")]));

        let err = DataFetcher::new(storage, source).fetch().await.unwrap_err();
        assert!(matches!(err, MinebaseError::ProcessingError { .. }));
    }

    #[test]
    fn test_http_source_rejects_bad_scheme() {
        assert!(HttpArchiveSource::new("ftp://example.com/a.zip", Duration::from_secs(5)).is_err());
        assert!(HttpArchiveSource::new("https://example.com/a.zip", Duration::from_secs(5)).is_ok());
    }
}
