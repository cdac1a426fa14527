//! Download a remote file into the workspace.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::ActionError;

/// Streams HTTP response bodies to disk.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    client: reqwest::Client,
}

impl FileFetcher {
    pub fn new() -> Result<Self, ActionError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ksbanim/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ActionError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Resolve `<workspace root>/<file_name>`.
    pub fn destination(
        workspace_root: Option<&Path>,
        file_name: &str,
    ) -> Result<PathBuf, ActionError> {
        workspace_root
            .map(|root| root.join(file_name))
            .ok_or(ActionError::NoWorkspace)
    }

    /// GET `url` and write the body to `destination`, replacing any
    /// existing file. Nothing is written unless the status is 200.
    pub async fn fetch_to(&self, url: &Url, destination: &Path) -> Result<(), ActionError> {
        tracing::debug!(%url, destination = %destination.display(), "fetching file");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ActionError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%url, %status, "unexpected response status");
            return Err(ActionError::HttpStatus(status.as_u16()));
        }

        let write_err = |e: std::io::Error| ActionError::Write {
            path: destination.to_path_buf(),
            message: e.to_string(),
        };

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(write_err)?;

        let mut body = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| ActionError::Transport(e.to_string()))?;
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_err)?;

        tracing::debug!(bytes = written, destination = %destination.display(), "download complete");
        Ok(())
    }
}
