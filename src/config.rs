use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/emails";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<String>,
}

impl Config {
    fn template() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            timeout_secs: None,
            log_file: None,
        }
    }

    /// CLI override first, then the file, then the default.
    pub fn endpoint(&self, cli_override: Option<&str>) -> Result<Url> {
        let raw = cli_override
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(raw).with_context(|| format!("invalid endpoint {raw:?}"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("rs_webmail"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn default_log_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("webmail.log");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Reads `path`, writing a template there first if it doesn't exist yet.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sample = Config::template();
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(path, tom)
            .with_context(|| format!("writing template config to {}", path.display()))?;
        // logging isn't up yet when this runs
        eprintln!("Created template config at {}", path.display());
        return Ok(sample);
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config =
        toml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

pub fn resolve_log_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.log_file {
        Ok(PathBuf::from(p))
    } else {
        default_log_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
        assert!(path.exists());

        // second load reads back what was written
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"http://127.0.0.1:9000/mail\"\ntimeout_secs = 5\nlog_file = \"/tmp/x.log\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.endpoint(None).unwrap().as_str(), "http://127.0.0.1:9000/mail");
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(resolve_log_path(&cfg).unwrap(), PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn cli_endpoint_wins_and_is_validated() {
        let cfg = Config::template();
        assert_eq!(
            cfg.endpoint(Some("http://example.test/e")).unwrap().host_str(),
            Some("example.test")
        );
        assert!(cfg.endpoint(Some("not a url")).is_err());
        assert_eq!(Config::default().endpoint(None).unwrap().as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn no_timeout_by_default() {
        assert_eq!(Config::default().timeout(), None);
    }
}
