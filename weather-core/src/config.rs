use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    fs,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";
pub const PORT_ENV: &str = "WEATHER_PORT";
pub const BASE_URL_ENV: &str = "WEATHER_BASE_URL";
pub const TIMEOUT_ENV: &str = "WEATHER_TIMEOUT_SECS";

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3001 }
    }
}

/// Upstream provider settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    /// Bound on a single upstream call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openweathermap.org".to_string(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Top-level configuration, loaded once at startup.
///
/// Example TOML:
/// ```toml
/// [server]
/// port = 3001
///
/// [provider]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

impl Config {
    /// Load config from `path`, or from the platform config file when it exists,
    /// then apply overrides from the process environment and `./.env`, and validate.
    ///
    /// Process environment wins over `.env`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = Self::base(path, Self::config_file_path())?;

        let dotenv = dotenv_vars(Path::new(".env"))?;
        cfg.apply_env_from(|name| std::env::var(name).ok().or_else(|| dotenv.get(name).cloned()))?;
        cfg.validate()?;

        Ok(cfg)
    }

    /// Config before overrides: the explicit file, else the platform file if
    /// present, else defaults.
    fn base(path: Option<&Path>, platform_path: Option<PathBuf>) -> Result<Self> {
        match (path, platform_path) {
            (Some(path), _) => Self::from_file(path),
            (None, Some(default_path)) if default_path.exists() => Self::from_file(&default_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Path to the platform config file, if the platform has a config directory.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "weather-proxy", "weather-server")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Override fields from variables resolved through `lookup`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.provider.api_key = key;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port =
                port.parse().with_context(|| format!("{PORT_ENV} is not a valid port: {port}"))?;
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.provider.base_url = url;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            self.provider.timeout_secs = secs
                .parse()
                .with_context(|| format!("{TIMEOUT_ENV} is not a number of seconds: {secs}"))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            bail!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: set {API_KEY_ENV} or `provider.api_key` in the config file."
            );
        }
        if self.provider.timeout_secs == 0 {
            bail!("provider.timeout_secs must be greater than zero");
        }

        Ok(())
    }
}

/// Read `KEY=value` pairs from a dotenv file. A missing file yields no pairs.
pub fn dotenv_vars(path: &Path) -> Result<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return Ok(HashMap::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    iter.map(|item| item.with_context(|| format!("Failed to parse {}", path.display())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_listen_on_3001_against_openweathermap() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.provider.base_url, "https://api.openweathermap.org");
        assert_eq!(cfg.provider.timeout_secs, 10);
    }

    #[test]
    fn validate_errors_without_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("No OpenWeatherMap API key configured"));
    }

    #[test]
    fn env_overrides_are_applied() {
        let mut cfg = Config::default();
        cfg.apply_env_from(env(&[
            (API_KEY_ENV, "KEY"),
            (PORT_ENV, "8080"),
            (BASE_URL_ENV, "http://127.0.0.1:9999"),
            (TIMEOUT_ENV, "3"),
        ]))
        .unwrap();

        assert_eq!(cfg.provider.api_key, "KEY");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.provider.base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.provider.timeout_secs, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply_env_from(env(&[(PORT_ENV, "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains("WEATHER_PORT is not a valid port"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str("[provider]\napi_key = \"FILE_KEY\"\n").unwrap();
        assert_eq!(cfg.provider.api_key, "FILE_KEY");
        assert_eq!(cfg.provider.timeout_secs, 10);
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 4000\n\n[provider]\napi_key = \"K\"\n").unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.provider.api_key, "K");
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/weather.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let mut cfg = Config::default();
        cfg.provider.api_key = "SECRET".into();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn missing_platform_dir_falls_back_to_defaults() {
        let cfg = Config::base(None, None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_platform_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::base(None, Some(dir.path().join("config.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn explicit_path_wins_over_platform_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let platform = dir.path().join("platform.toml");
        fs::write(&explicit, "[server]\nport = 5000\n").unwrap();
        fs::write(&platform, "[server]\nport = 6000\n").unwrap();

        let cfg = Config::base(Some(&explicit), Some(platform)).unwrap();
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn dotenv_file_supplies_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "# local secrets\nOPENWEATHERMAP_API_KEY=\"FROM_DOTENV\"\nWEATHER_PORT=4001\n")
            .unwrap();

        let vars = dotenv_vars(&path).unwrap();
        let mut cfg = Config::default();
        cfg.apply_env_from(|name| vars.get(name).cloned()).unwrap();

        assert_eq!(cfg.provider.api_key, "FROM_DOTENV");
        assert_eq!(cfg.server.port, 4001);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_dotenv_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let vars = dotenv_vars(&dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn malformed_dotenv_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "this is not a pair\n").unwrap();

        let err = dotenv_vars(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
