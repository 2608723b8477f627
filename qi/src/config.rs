//! Configuration for queryinterp

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::QueryFormat;
use crate::variable::Scope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// refId given to queries rendered from the command line
    #[serde(default = "default_ref_id")]
    pub ref_id: String,

    /// Result shape requested for rendered queries
    #[serde(default)]
    pub format: QueryFormat,

    /// Preset variables, overridden by bindings given on the command line
    #[serde(default)]
    pub variables: Scope,
}

fn default_ref_id() -> String {
    "A".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            ref_id: default_ref_id(),
            format: QueryFormat::default(),
            variables: Scope::default(),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(?config_path, "Config::load: explicit path");
            let content = read_file(config_path)?;
            return Ok(serde_yaml::from_str(&content)?);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("queryinterp").join("config.yml")),
            Some(PathBuf::from("queryinterp.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(?path, "Config::load: found default config");
                let content = read_file(path)?;
                return Ok(serde_yaml::from_str(&content)?);
            }
        }

        debug!("Config::load: using defaults");
        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a YAML file of variable bindings
pub fn load_scope(path: &Path) -> Result<Scope> {
    debug!(?path, "load_scope: called");
    let content = read_file(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ref_id, "A");
        assert_eq!(config.format, QueryFormat::Table);
        assert!(config.variables.is_empty());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            r#"
log_level: debug
format: time_series
variables:
  host:
    multiplicity: multi
    value: [web-1, web-2]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.ref_id, "A");
        assert_eq!(config.format, QueryFormat::TimeSeries);
        assert_eq!(config.variables.get("host"), Some(&Variable::multi(["web-1", "web-2"])));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.yml");
        let config = Config {
            ref_id: "Q".to_string(),
            variables: Scope::new().with("n", Variable::single(3i64)),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = PathBuf::from("/nonexistent/queryinterp.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_load_scope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vars.yml");
        std::fs::write(&path, "__interval:\n  multiplicity: single\n  value: 1m\n").unwrap();
        let scope = load_scope(&path).unwrap();
        assert_eq!(scope.get("__interval"), Some(&Variable::single("1m")));
    }
}
