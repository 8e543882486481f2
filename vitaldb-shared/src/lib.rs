pub mod config {
    use std::path::Path;

    use serde::{Deserialize, Serialize, de::DeserializeOwned};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Server {
        pub base_url: String,
    }
    impl Default for Server {
        fn default() -> Self {
            Self {
                base_url: "http://localhost:8000".to_string(),
            }
        }
    }

    #[derive(Debug)]
    pub enum ConfigError {
        Io(std::io::Error),
        Parse(toml::de::Error),
        Serialize(toml::ser::Error),
    }
    impl std::fmt::Display for ConfigError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                ConfigError::Io(e) => write!(f, "I/O error: {e}"),
                ConfigError::Parse(e) => write!(f, "Parse error: {e}"),
                ConfigError::Serialize(e) => write!(f, "Serialize error: {e}"),
            }
        }
    }
    impl std::error::Error for ConfigError {}
    impl From<std::io::Error> for ConfigError {
        fn from(e: std::io::Error) -> Self {
            ConfigError::Io(e)
        }
    }
    impl From<toml::de::Error> for ConfigError {
        fn from(e: toml::de::Error) -> Self {
            ConfigError::Parse(e)
        }
    }
    impl From<toml::ser::Error> for ConfigError {
        fn from(e: toml::ser::Error) -> Self {
            ConfigError::Serialize(e)
        }
    }

    /// Load a TOML config file, returning `T::default()` if the file doesn't exist.
    pub fn load_config<T: Default + DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found at {}, using defaults", path.display());
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write a config back out, so that new fields show up with their defaults.
    pub fn save_config<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string(config)?)?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }

}
