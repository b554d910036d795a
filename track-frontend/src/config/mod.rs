use serde::Deserialize;
use std::time::Duration;
use track_core::config::{load_layered, Config as ServerSettings, TelemetryConfig};
use track_core::error::AppError;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    pub backend: BackendSettings,
    /// Office buildings claims and assets can be filed against.
    #[serde(default = "default_buildings")]
    pub buildings: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    /// Base URL of the REST backend, e.g. `https://ops.example.com/api`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_buildings() -> Vec<String> {
    vec!["Building A".to_string(), "Building B".to_string()]
}

impl Settings {
    /// Case-insensitive lookup returning the configured spelling.
    pub fn canonical_building(&self, building: &str) -> Option<&str> {
        self.buildings
            .iter()
            .find(|b| b.eq_ignore_ascii_case(building.trim()))
            .map(String::as_str)
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Running from the workspace root or from inside the crate
    let configuration_directory = if base_path.ends_with("track-frontend") {
        base_path.join("config")
    } else {
        base_path.join("track-frontend").join("config")
    };

    load_layered(&configuration_directory.join("base.yaml"), &["buildings"])
}
