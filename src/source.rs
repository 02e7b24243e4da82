//! Response sources: where the raw provider response comes from.
//!
//! The pipeline itself is pure; the only I/O is obtaining the response JSON.
//! [`ResponseSource`] is the seam: an HTTP client, a queue consumer or a test
//! fixture implements it, and [`crate::generate::generate`] bounds the fetch
//! with the configured timeout.
//!
//! Two implementations ship with the crate:
//!
//! * [`StaticSource`]: an in-memory value, for callers that already hold the
//!   response and for tests.
//! * [`FileSource`]: a response saved to disk as JSON, for replaying
//!   captured responses through the pipeline.

use crate::error::ReportError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that can deliver one raw provider response.
pub trait ResponseSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Fetch the response. Errors are fatal for the run.
    fn fetch(&self) -> BoxFuture<'_, Result<Value, ReportError>>;
}

/// A response already held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    response: Value,
}

impl StaticSource {
    pub fn new(response: Value) -> Self {
        Self::named("static", response)
    }

    pub fn named(name: impl Into<String>, response: Value) -> Self {
        Self {
            name: name.into(),
            response,
        }
    }
}

impl ResponseSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Value, ReportError>> {
        let response = self.response.clone();
        Box::pin(async move { Ok(response) })
    }
}

/// A response stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Value, ReportError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.failed(format!("cannot read file: {e}")))?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        serde_json::from_slice(&bytes).map_err(|e| self.failed(format!("not valid JSON: {e}")))
    }

    fn failed(&self, detail: String) -> ReportError {
        ReportError::SourceFailed {
            source_name: self.name.clone(),
            detail,
        }
    }
}

impl ResponseSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Value, ReportError>> {
        Box::pin(self.read())
    }
}
