//! Asset invoker: turns one task into one written file. One provider call,
//! one filesystem write, nothing else externally visible.

use crate::error::GenerateError;
use crate::provider::{ImageProvider, ImageRequest, ReferenceImage};
use crate::runner::{TaskInvoker, TaskSpec};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AssetInvoker {
    provider: Arc<dyn ImageProvider>,
}

impl AssetInvoker {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    fn load_reference(path: &Path) -> Result<ReferenceImage, GenerateError> {
        let bytes = std::fs::read(path).map_err(|e| {
            GenerateError::ReferenceUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Ok(ReferenceImage {
            mime_type: mime_for_path(path).to_string(),
            bytes,
        })
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}

/// Timestamp component of output filenames. Second resolution matches the
/// original asset naming; two runs of the same item within one second would
/// collide, which is accepted.
fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

#[async_trait]
impl TaskInvoker for AssetInvoker {
    async fn invoke(&self, task: &TaskSpec) -> Result<PathBuf, GenerateError> {
        std::fs::create_dir_all(&task.destination).map_err(|e| GenerateError::WriteFailed {
            path: task.destination.clone(),
            source: e,
        })?;

        let reference = match &task.reference {
            Some(path) => Some(Self::load_reference(path)?),
            None => None,
        };

        let request = ImageRequest {
            prompt: task.prompt.clone(),
            aspect: task.aspect,
            reference,
        };

        tracing::info!(
            zone = %task.zone,
            item = %task.item_id,
            model = %self.provider.model_name(),
            "requesting generation"
        );
        let image = self.provider.generate(&request).await?;

        let filename = format!("{}-{}.{}", task.item_id, timestamp(), image.extension);
        let output_path = task.destination.join(filename);
        std::fs::write(&output_path, &image.bytes).map_err(|e| GenerateError::WriteFailed {
            path: output_path.clone(),
            source: e,
        })?;

        tracing::info!(
            zone = %task.zone,
            item = %task.item_id,
            model = %image.model,
            path = %output_path.display(),
            "asset written"
        );
        Ok(output_path)
    }
}
