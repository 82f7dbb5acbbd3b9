//! Watcher3-backed implementation of the `SystemService` trait.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::clients::watcher3::{SourceApi, SourceResponse};
use crate::constants::root_folder::FREE_SPACE_FALLBACK;
use crate::models::RootFolderRecord;
use crate::services::system_service::{SystemError, SystemService, SystemStatus};

pub struct WatcherSystemService {
    source: Arc<dyn SourceApi>,
    root_folder: String,
}

impl WatcherSystemService {
    #[must_use]
    pub fn new(source: Arc<dyn SourceApi>, root_folder: impl Into<String>) -> Self {
        Self {
            source,
            root_folder: root_folder.into(),
        }
    }

    fn unavailable(response: &SourceResponse) -> SystemError {
        SystemError::Unavailable(response.error_message().unwrap_or_default().to_string())
    }

    fn get_free_space_blocking(path: &str) -> Option<u64> {
        use std::process::Command;

        if !Path::new(path).is_dir() {
            return None;
        }

        let output = Command::new("df").arg("-B1").arg(path).output().ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);

        let line = stdout.lines().nth(1)?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        parts.get(3)?.parse().ok()
    }
}

#[async_trait]
impl SystemService for WatcherSystemService {
    async fn get_status(&self) -> Result<SystemStatus, SystemError> {
        let response = self.source.get_data("version", &[]).await?;

        if !response.is_success() {
            return Err(Self::unavailable(&response));
        }

        let version = match response.field("version") {
            Some(Value::String(version)) => version.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Ok(SystemStatus { version })
    }

    async fn get_root_folders(&self) -> Result<Vec<RootFolderRecord>, SystemError> {
        let response = self.source.get_data("getconfig", &[]).await?;

        if !response.is_success() {
            return Err(Self::unavailable(&response));
        }

        let free_space = self
            .get_free_space(&self.root_folder)
            .await?
            .unwrap_or_else(|| {
                debug!(path = %self.root_folder, "Root folder not on this host, using placeholder free space");
                FREE_SPACE_FALLBACK
            });

        Ok(vec![RootFolderRecord::new(&self.root_folder, free_space)])
    }

    async fn get_free_space(&self, path: &str) -> Result<Option<u64>, SystemError> {
        let path = path.to_string();
        tokio::task::spawn_blocking(move || Self::get_free_space_blocking(&path))
            .await
            .map_err(|e| SystemError::Internal(e.to_string()))
    }
}
