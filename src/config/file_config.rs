//! Configuration file support for pubcat.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:5000"
//!
//! [catalog]
//! data_file = "./publications.json"
//!
//! [search]
//! default_page_size = 10
//!
//! [citation]
//! default_style = "GOST"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Configuration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// The default configuration rendered as TOML
pub fn default_config_toml() -> Result<String, ConfigFileError> {
    toml::to_string_pretty(&Config::default()).map_err(|e| ConfigFileError::Serialize(e.to_string()))
}

/// Write the default configuration to `path`, creating parent directories.
///
/// An existing file is only replaced when `force` is set.
pub fn init_config_file(path: &Path, force: bool) -> Result<PathBuf, ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    let content = default_config_toml()?;
    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn test_default_toml_sections() {
        let content = default_config_toml().unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("bind = \"127.0.0.1:5000\""));
        assert!(content.contains("default_style = \"GOST\""));
        assert!(!content.contains("data_file"));
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = init_config_file(&path, false).unwrap();
        assert_eq!(written, path);

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndefault_page_size = 3\n").unwrap();

        let result = init_config_file(&path, false);
        assert!(matches!(result, Err(ConfigFileError::AlreadyExists(_))));

        init_config_file(&path, true).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.search.default_page_size, 10);
    }
}
