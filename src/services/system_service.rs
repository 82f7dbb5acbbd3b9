//! Domain service for system-level answers: version status and root folders.

use serde::Serialize;
use thiserror::Error;

use crate::clients::watcher3::SourceError;
use crate::models::RootFolderRecord;

#[derive(Debug, Error)]
pub enum SystemError {
    /// Watcher3 answered with `"response": false` or could not be reached.
    #[error("Watcher3 unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SystemStatus {
    pub version: String,
}

#[async_trait::async_trait]
pub trait SystemService: Send + Sync {
    /// Reports Watcher3's version as the system version.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Unavailable`] when Watcher3 does not answer the
    /// version request successfully.
    async fn get_status(&self) -> Result<SystemStatus, SystemError>;

    /// Lists the single root folder movies are moved into.
    ///
    /// Watcher3's configuration is re-fetched to confirm it is reachable; the
    /// path itself comes from the configuration read at startup.
    async fn get_root_folders(&self) -> Result<Vec<RootFolderRecord>, SystemError>;

    /// Free bytes on the filesystem holding `path`, when `path` is an existing
    /// directory and the query succeeds.
    async fn get_free_space(&self, path: &str) -> Result<Option<u64>, SystemError>;
}
