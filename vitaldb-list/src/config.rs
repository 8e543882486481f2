use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use vitaldb_shared::config::{Server, load_config, save_config};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub viewer: Viewer,
}
impl Config {
    pub const FILENAME: &str = "vitaldb-config.toml";

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        load_config(path).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        save_config(path, self).with_context(|| format!("Failed to save {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    /// How many clinical-info requests may be in flight at once.
    pub fetch_concurrency: usize,
    pub tick_rate_ms: u64,
}
impl Default for General {
    fn default() -> Self {
        Self {
            fetch_concurrency: vitaldb_core::HttpSource::DEFAULT_CONCURRENCY,
            tick_rate_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Viewer {
    /// The number of points to request per signal.
    pub resolution: u32,
    pub chart_width: f64,
    pub chart_height: f64,
}
impl Default for Viewer {
    fn default() -> Self {
        Self {
            resolution: 500,
            chart_width: 100.0,
            chart_height: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            base_url = "https://vitaldb.example.org"

            [viewer]
            resolution = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.server.base_url, "https://vitaldb.example.org");
        assert_eq!(config.viewer.resolution, 1000);
        assert_eq!(config.viewer.chart_width, 100.0);
        assert_eq!(config.general, General::default());
    }

    #[test]
    fn default_config_survives_a_save() {
        let path = std::env::temp_dir().join(format!(
            "vitaldb-list-config-{}.toml",
            std::process::id()
        ));
        Config::default().save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
