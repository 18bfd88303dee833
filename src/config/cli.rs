use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Batch body stored on local disk, read verbatim.
#[derive(Debug, Clone)]
pub struct PayloadFile {
    path: PathBuf,
}

impl PayloadFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), self.path.display());
        Ok(data)
    }
}
