use crate::utils::logging::LogFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "nappi";
const CONFIG_FILE: &str = "config.toml";

/// Default catalog file, relative to the working directory
pub const DEFAULT_SOURCE: &str = "nappi_data.txt";

/// Default HTTP listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default caller-side minimum search term length
pub const DEFAULT_MIN_TERM_LEN: usize = 3;

/// Default number of cached queries per generation
pub const DEFAULT_CACHE_SIZE: usize = 128;

/// Configuration file format (TOML)
///
/// ```toml
/// [service]
/// source = "/srv/nappi/nappi_data.txt"
/// bind = "127.0.0.1:8080"
/// min_term_len = 3
/// cache_size = 256
/// log_format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub service: ServiceConfigFile,
}

/// Service section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfigFile {
    pub source: Option<PathBuf>,
    pub bind: Option<SocketAddr>,
    pub min_term_len: Option<usize>,
    pub cache_size: Option<usize>,
    pub log_format: Option<LogFormat>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Fixed-width catalog file
    pub source: PathBuf,
    /// HTTP listen address
    pub bind: SocketAddr,
    /// Minimum length of a whole search term, checked before searching
    pub min_term_len: usize,
    /// Query cache entries per generation (0 disables the cache)
    pub cache_size: usize,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            min_term_len: DEFAULT_MIN_TERM_LEN,
            cache_size: DEFAULT_CACHE_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Load config with priority: environment variables > config file > defaults
    ///
    /// The config file is `explicit` if given, else `$NAPPI_CONFIG`, else
    /// `config.toml` in the user config directory when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(explicit) {
            let file = read_config_file(&path)?;
            config.apply_file(file);
        }

        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Apply values present in a parsed config file
    pub fn apply_file(&mut self, file: ConfigFile) {
        let service = file.service;
        if let Some(v) = service.source {
            self.source = v;
        }
        if let Some(v) = service.bind {
            self.bind = v;
        }
        if let Some(v) = service.min_term_len {
            self.min_term_len = v;
        }
        if let Some(v) = service.cache_size {
            self.cache_size = v;
        }
        if let Some(v) = service.log_format {
            self.log_format = v;
        }
    }

    /// Apply `NAPPI_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(val) = lookup("NAPPI_SOURCE") {
            self.source = PathBuf::from(val);
        }

        if let Some(val) = lookup("NAPPI_BIND") {
            self.bind = val
                .parse()
                .with_context(|| format!("Invalid NAPPI_BIND: {}", val))?;
        }

        if let Some(val) = lookup("NAPPI_MIN_TERM_LEN") {
            self.min_term_len = val
                .parse()
                .with_context(|| format!("Invalid NAPPI_MIN_TERM_LEN: {}", val))?;
        }

        if let Some(val) = lookup("NAPPI_CACHE_SIZE") {
            self.cache_size = val
                .parse()
                .with_context(|| format!("Invalid NAPPI_CACHE_SIZE: {}", val))?;
        }

        if let Some(val) = lookup("NAPPI_LOG_FORMAT") {
            self.log_format = val
                .parse()
                .with_context(|| format!("Invalid NAPPI_LOG_FORMAT: {}", val))?;
        }

        Ok(())
    }
}

/// Parse a config file; a file that exists but does not parse is an error
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("NAPPI_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let default = get_config_path()?;
    default.exists().then_some(default)
}

/// Default config file location in the user config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.source, PathBuf::from("nappi_data.txt"));
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.min_term_len, 3);
        assert_eq!(config.cache_size, 128);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_file_parse_full() {
        let toml_content = r#"
[service]
source = "/srv/nappi/data.txt"
bind = "127.0.0.1:9090"
min_term_len = 4
cache_size = 0
log_format = "json"
"#;

        let file: ConfigFile = toml::from_str(toml_content).unwrap();
        let mut config = ServiceConfig::default();
        config.apply_file(file);

        assert_eq!(config.source, PathBuf::from("/srv/nappi/data.txt"));
        assert_eq!(config.bind.port(), 9090);
        assert_eq!(config.min_term_len, 4);
        assert_eq!(config.cache_size, 0);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_config_file_parse_partial() {
        let file: ConfigFile = toml::from_str("[service]\ncache_size = 16\n").unwrap();
        let mut config = ServiceConfig::default();
        config.apply_file(file);

        assert_eq!(config.cache_size, 16);
        assert_eq!(config.source, PathBuf::from(DEFAULT_SOURCE));
    }

    #[test]
    fn test_config_file_parse_empty() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.service.source.is_none());
        assert!(file.service.bind.is_none());
    }

    #[test]
    fn test_malformed_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[service]\ncache_size = \"many\"\n").unwrap();

        assert!(read_config_file(&path).is_err());
        assert!(ServiceConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServiceConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile =
            toml::from_str("[service]\nbind = \"127.0.0.1:9090\"\ncache_size = 16\n").unwrap();
        let mut config = ServiceConfig::default();
        config.apply_file(file);

        config
            .apply_env(env(&[
                ("NAPPI_BIND", "127.0.0.1:7070"),
                ("NAPPI_SOURCE", "/tmp/catalog.txt"),
                ("NAPPI_LOG_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.bind.port(), 7070);
        assert_eq!(config.cache_size, 16);
        assert_eq!(config.source, PathBuf::from("/tmp/catalog.txt"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_value_is_error() {
        let mut config = ServiceConfig::default();
        assert!(config.apply_env(env(&[("NAPPI_CACHE_SIZE", "lots")])).is_err());
        assert!(config.apply_env(env(&[("NAPPI_BIND", "nowhere")])).is_err());
    }
}
