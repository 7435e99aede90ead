use crate::domain::edition::Edition;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Root of the minecraft-data checkout (the directory holding `data/`).
    fn data_dir(&self) -> &str;
    /// Versions listed in `dataPaths.json` but missing from the common
    /// versions list.
    fn manifest_only_versions(&self, edition: Edition) -> &[String];
    fn fetch_url(&self) -> String;
    fn export_dir(&self) -> &str;
}

/// Where a minecraft-data archive comes from.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Human readable origin, recorded in the fetch stamp.
    fn describe(&self) -> String;
    async fn download(&self) -> Result<Vec<u8>>;
}
