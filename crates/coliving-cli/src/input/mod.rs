pub mod file;
pub mod stdin;

use coliving_core::config::{ConfigOverlay, ModelConfig};
use tracing::debug;

/// Built-in assumptions with an optional partial configuration merged on top.
///
/// The overlay comes from `path` when given, else from piped stdin JSON.
pub fn load_config(path: Option<&str>) -> Result<ModelConfig, Box<dyn std::error::Error>> {
    let overlay: Option<ConfigOverlay> = if let Some(path) = path {
        Some(file::read_structured(path)?)
    } else {
        stdin::read_piped()?
    };

    match overlay {
        Some(overlay) => {
            debug!("merging configuration overlay onto defaults");
            Ok(ModelConfig::from_overlay(overlay))
        }
        None => {
            debug!("no configuration given; using built-in defaults");
            Ok(ModelConfig::default())
        }
    }
}
