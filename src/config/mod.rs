use chrono_tz::Tz;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{GeoNamesError, Result};

/// Public GeoNames web service root.
pub const DEFAULT_BASE_URL: &str = "http://api.geonames.org/";

/// Default request timeout. The service itself imposes none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Redirects followed before a request is treated as failed.
pub const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("geonames/", env!("CARGO_PKG_VERSION"));

/// Verbosity of the service response (`style` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Style {
    Short,
    Medium,
    Long,
    #[default]
    Full,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Short => "SHORT",
            Style::Medium => "MEDIUM",
            Style::Long => "LONG",
            Style::Full => "FULL",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How weather observation timestamps are interpreted.
///
/// The service reports station time as a bare `YYYY-MM-DD HH:MM:SS` string
/// with no offset. `Local` reads it in the host's timezone; `Fixed` pins it
/// to a named IANA zone so results do not depend on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimezonePolicy {
    #[default]
    Local,
    Fixed(Tz),
}

impl FromStr for TimezonePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            return Ok(TimezonePolicy::Local);
        }
        s.parse::<Tz>()
            .map(TimezonePolicy::Fixed)
            .map_err(|_| format!("unknown timezone: {s}"))
    }
}

/// Client configuration.
///
/// Built once by the embedding application and handed to every
/// [`GeoNames`](crate::GeoNames) instance it creates.
#[derive(Debug, Clone)]
pub struct Config {
    /// GeoNames account name, sent as `username` on every request.
    pub username: Option<String>,
    /// Service root; operation names are appended directly to it.
    pub base_url: String,
    /// Default `style` parameter.
    pub style: Style,
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub timezone: TimezonePolicy,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            style: Style::default(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            timezone: TimezonePolicy::default(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn new(username: impl Into<String>) -> Self {
        Self::default().with_username(username)
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: TimezonePolicy) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the account name, failing if it was never set or is blank.
    pub fn require_username(&self) -> Result<&str> {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(GeoNamesError::Configuration(
                "username must be set before creating a GeoNames client".to_string(),
            )),
        }
    }
}

/// Settings read from a `geonames.toml` file.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl FileConfig {
    /// Searches the usual locations and returns the first file that parses.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => return Some(config),
                Err(e) => {
                    tracing::warn!("Failed to load config file {}: {}", path.display(), e);
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Layers the file's values over `base`. A `timeout_secs` of 0 disables
    /// the timeout.
    pub fn apply(self, mut base: Config) -> Result<Config> {
        if let Some(username) = self.username {
            base.username = Some(username);
        }
        if let Some(base_url) = self.base_url {
            base.base_url = base_url;
        }
        if let Some(style) = self.style {
            base.style = style;
        }
        if let Some(secs) = self.timeout_secs {
            base.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(tz) = self.timezone {
            base.timezone = tz.parse().map_err(GeoNamesError::Configuration)?;
        }
        Ok(base)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geonames.toml"));
    paths.push(PathBuf::from(".geonames.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geonames").join("config.toml"));
        paths.push(config_dir.join("geonames.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geonames.toml"));
        paths.push(home.join(".config").join("geonames").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://api.geonames.org/");
        assert_eq!(config.style, Style::Full);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.timezone, TimezonePolicy::Local);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_require_username() {
        assert!(matches!(
            Config::default().require_username(),
            Err(GeoNamesError::Configuration(_))
        ));
        assert!(matches!(
            Config::new("   ").require_username(),
            Err(GeoNamesError::Configuration(_))
        ));
        assert_eq!(Config::new("demo").require_username().unwrap(), "demo");
    }

    #[test]
    fn test_last_write_wins() {
        let config = Config::new("first")
            .with_username("second")
            .with_style(Style::Short)
            .with_style(Style::Medium);
        assert_eq!(config.username.as_deref(), Some("second"));
        assert_eq!(config.style, Style::Medium);
    }

    #[test]
    fn test_timezone_policy_parse() {
        assert_eq!(
            "local".parse::<TimezonePolicy>().unwrap(),
            TimezonePolicy::Local
        );
        assert_eq!(
            "Europe/London".parse::<TimezonePolicy>().unwrap(),
            TimezonePolicy::Fixed(chrono_tz::Europe::London)
        );
        assert!("Mars/Olympus".parse::<TimezonePolicy>().is_err());
    }

    #[test]
    fn test_file_config_apply() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
username = "demo"
base_url = "http://mirror.example/"
style = "SHORT"
timeout_secs = 0
timezone = "UTC"
"#
        )
        .unwrap();

        let file_config = FileConfig::from_path(file.path()).unwrap();
        let config = file_config.apply(Config::default()).unwrap();

        assert_eq!(config.username.as_deref(), Some("demo"));
        assert_eq!(config.base_url, "http://mirror.example/");
        assert_eq!(config.style, Style::Short);
        assert_eq!(config.timeout, None);
        assert_eq!(config.timezone, TimezonePolicy::Fixed(chrono_tz::UTC));
    }

    #[test]
    fn test_file_config_rejects_unknown_timezone() {
        let file_config = FileConfig {
            timezone: Some("Nowhere/Special".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            file_config.apply(Config::default()),
            Err(GeoNamesError::Configuration(_))
        ));
    }
}
