pub mod check;
pub mod list;
pub mod play;

use std::path::Path;

use teller_core::Catalog;
use teller_engine::EngineConfig;

/// Load and validate the story catalog in `dir`.
fn load_catalog(dir: &Path) -> Result<Catalog, String> {
    Catalog::load_dir(dir).map_err(|e| e.to_string())
}

/// Read engine settings from a YAML file, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    serde_yaml::from_str(&source).map_err(|e| format!("invalid config {}: {e}", path.display()))
}
