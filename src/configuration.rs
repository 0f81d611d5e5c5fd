use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_APPLICATION_ID: &str = "docmost";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_OUTPUT_FORMAT: &str = "table";

pub const CONFIG_DIR_ENV: &str = "DOCMOST_CONFIG_DIR";
pub const URL_ENV: &str = "DOCMOST_URL";
pub const FORMAT_ENV: &str = "DOCMOST_FORMAT";
pub const SPACE_ENV: &str = "DOCMOST_SPACE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data from {path:?}, because of: {cause}")]
    FailedToLoadData {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write configuration data to {path:?}, because of: {cause}")]
    FailedToWriteData {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Persistent CLI settings.
///
/// Stored as YAML. Every key is optional; environment variables override the
/// file value key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_space: Option<String>,
}

impl Configuration {
    /// Directory holding the configuration file and the token file.
    pub fn default_configuration_dir() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            if !config_dir_str.is_empty() {
                return Ok(PathBuf::from(config_dir_str));
            }
        }

        match config_dir() {
            Some(mut configuration_directory) => {
                configuration_directory.push(DEFAULT_APPLICATION_ID);
                Ok(configuration_directory)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::default_configuration_dir()?;
        path.push(DEFAULT_CONFIGURATION_FILE_NAME);
        Ok(path)
    }

    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Self::get_default_configuration_file_path()?;
        Self::load_from_file(&default_file_path)
    }

    /// Reads the file at `path`. A missing or empty file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        debug!("Loading configuration from {}...", path.display());

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Configuration file not found, using defaults");
                return Ok(Configuration::default());
            }
            Err(cause) => {
                return Err(ConfigurationError::FailedToLoadData {
                    path: path.to_path_buf(),
                    cause: Box::new(cause),
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Configuration::default());
        }

        serde_yaml::from_str(&contents).map_err(|cause| ConfigurationError::FailedToLoadData {
            path: path.to_path_buf(),
            cause: Box::new(cause),
        })
    }

    /// Applies the `DOCMOST_*` environment variables.
    pub fn with_environment(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(url) = lookup(URL_ENV) {
            self.url = Some(url);
        }
        if let Some(format) = lookup(FORMAT_ENV) {
            self.default_format = Some(format);
        }
        if let Some(space) = lookup(SPACE_ENV) {
            self.default_space = Some(space);
        }
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }

    pub fn default_format(&self) -> &str {
        self.default_format.as_deref().unwrap_or(DEFAULT_OUTPUT_FORMAT)
    }

    pub fn set_default_format(&mut self, format: Option<String>) {
        self.default_format = format;
    }

    pub fn default_space(&self) -> Option<&str> {
        self.default_space.as_deref()
    }

    pub fn set_default_space(&mut self, space: Option<String>) {
        self.default_space = space;
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(writer, self)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        let write_error = |cause: Box<dyn std::error::Error + Send + Sync>| {
            ConfigurationError::FailedToWriteData {
                path: path.to_path_buf(),
                cause,
            }
        };

        match path.parent() {
            Some(directory) if !directory.as_os_str().is_empty() => {
                fs::create_dir_all(directory).map_err(|e| write_error(Box::new(e)))?;
            }
            _ => (),
        }

        let file = File::create(path).map_err(|e| write_error(Box::new(e)))?;
        self.write(file).map_err(|e| write_error(Box::new(e)))?;
        debug!("Configuration saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let configuration = Configuration::load_from_file(&dir.path().join("config.yaml")).unwrap();

        assert_eq!(configuration, Configuration::default());
        assert_eq!(configuration.default_format(), "table");
        assert!(configuration.url().is_none());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(Configuration::load_from_file(&path).unwrap(), Configuration::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut configuration = Configuration::default();
        configuration.set_url(Some("https://wiki.example.com/api".to_string()));
        configuration.set_default_space(Some("space-1".to_string()));
        configuration.save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("url: https://wiki.example.com/api"));
        assert!(!contents.contains("default_format"));

        assert_eq!(Configuration::load_from_file(&path).unwrap(), configuration);
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "url: [unclosed").unwrap();

        let err = Configuration::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigurationError::FailedToLoadData { .. }));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "url: https://file.example.com/api\ndefault_format: json\ndefault_space: from-file\n",
        )
        .unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            (URL_ENV, "https://env.example.com/api"),
            (SPACE_ENV, "from-env"),
            (FORMAT_ENV, ""),
        ]);
        let configuration = Configuration::load_from_file(&path)
            .unwrap()
            .with_overrides(|name| env.get(name).map(|value| value.to_string()));

        assert_eq!(configuration.url(), Some("https://env.example.com/api"));
        assert_eq!(configuration.default_space(), Some("from-env"));
        assert_eq!(configuration.default_format(), "json");
    }
}
