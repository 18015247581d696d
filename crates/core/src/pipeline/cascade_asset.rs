use std::path::Path;

use crate::detection::domain::classifier::{CascadeLoader, Classifier};
use crate::shared::error::PipelineError;

/// Reads a cascade blob from disk and hands it to the engine's loader.
///
/// Called once before the loop starts. The blob's format is the engine's
/// business; only an empty file is rejected here.
pub fn load_cascade(
    path: &Path,
    loader: &dyn CascadeLoader,
) -> Result<Box<dyn Classifier>, PipelineError> {
    let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(PipelineError::InvalidCascadeFormat(format!(
            "{} is empty",
            path.display()
        )));
    }
    log::info!("Loading cascade {} ({} bytes)", path.display(), bytes.len());
    loader.load(&bytes)
}
