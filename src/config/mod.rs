mod types;

pub use types::*;

use anyhow::{Context, Result};
use nullmedia_av::Tool;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./nullmedia.toml",
        "~/.config/nullmedia/config.toml",
        "/etc/nullmedia/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Warn about configured tool paths that do not exist; those tools fall back
/// to a `PATH` lookup.
fn validate_config(config: &Config) {
    for tool in Tool::ALL {
        if let Some(path) = config.tools.get(tool) {
            if !path.exists() {
                tracing::warn!("Configured {} path does not exist: {:?}", tool, path);
            }
        }
    }
}
