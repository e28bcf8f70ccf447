//! CLI command implementations.

pub mod clean;
pub mod run;

use std::path::Path;

use weatherfit::PipelineConfig;

/// Load the configuration file if given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> weatherfit::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_json_file(path),
        None => Ok(PipelineConfig::default()),
    }
}

/// Fail early with a readable message when the input file is absent.
pub(crate) fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
