use nullmedia_av::ToolPaths;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Executable overrides; unset tools are looked up on `PATH`.
    #[serde(default)]
    pub tools: ToolPaths,

    #[serde(default)]
    pub identify: IdentifyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentifyConfig {
    /// Sniff magic bytes when a file has no extension or an unknown one.
    #[serde(default = "default_true")]
    pub sniff_missing_ext: bool,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self {
            sniff_missing_ext: true,
        }
    }
}

fn default_true() -> bool {
    true
}
