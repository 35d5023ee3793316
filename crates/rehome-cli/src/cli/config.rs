use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rehome_core::{CoreConfig, Viewer, ViewerKind};

fn default_true() -> bool {
    true
}

/// CLI configuration loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Base URL of the platform API.
    pub api_base: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    pub viewer: ViewerConfig,

    /// Permission flag for the composer; defaults to allowed.
    #[serde(default = "default_true")]
    pub can_create_messages: bool,
}

/// Who the CLI acts as.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// "Adopter" or "Rescue".
    pub kind: ViewerKind,
    pub id: String,
    /// Staff member ids, only meaningful for rescue viewers.
    #[serde(default)]
    pub staff_roster: Vec<String>,
}

impl ViewerConfig {
    pub fn to_viewer(&self) -> Viewer {
        match self.kind {
            ViewerKind::Adopter => Viewer::adopter(self.id.clone()),
            ViewerKind::RescueOrg => {
                Viewer::rescue_org(self.id.clone(), self.staff_roster.iter().cloned())
            }
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/rehome/config.json` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("rehome").join("config.json"))
    }

    pub fn to_core_config(&self) -> CoreConfig {
        let mut config = CoreConfig::new(self.api_base.clone());
        if let Some(token) = &self.auth_token {
            config = config.with_auth_token(token.clone());
        }
        config
    }
}
