use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
	Chrome,
	Firefox,
}

impl FromStr for Browser {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"chrome" | "chromium" => Ok(Browser::Chrome),
			"firefox" => Ok(Browser::Firefox),
			other => Err(ConfigError::InvalidBrowser(other.to_string())),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Config {
	pub database_path: PathBuf,
	pub log_level: Option<String>,
	pub log_file: Option<PathBuf>,
	pub webdriver_url: String,
	pub browser: Browser,
	pub headless: bool,
	pub ready_timeout_secs: u64,
	pub settle_timeout_secs: u64,
	pub pre_fill_submit: bool,
	pub base_url: Option<String>,
	pub username: Option<String>,
	pub password: Option<String>,
	pub stub_port: u16,
}

impl Config {
	/// Reads the process environment, after loading `.env` if one exists.
	pub fn from_env() -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();
		Self::from_lookup(|key| env::var(key).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

		Ok(Self {
			database_path: non_empty("DATABASE_PATH")
				.map(PathBuf::from)
				.unwrap_or_else(|| PathBuf::from("data/data.db")),
			log_level: non_empty("LOG_LEVEL"),
			log_file: non_empty("LOG_FILE").map(PathBuf::from),
			webdriver_url: non_empty("WEBDRIVER_URL")
				.unwrap_or_else(|| "http://localhost:4444".to_string()),
			browser: non_empty("PROBE_BROWSER")
				.map(|v| v.parse())
				.transpose()?
				.unwrap_or(Browser::Chrome),
			headless: parse_flag("PROBE_HEADLESS", non_empty("PROBE_HEADLESS"), true)?,
			ready_timeout_secs: parse_secs("PROBE_READY_TIMEOUT", non_empty("PROBE_READY_TIMEOUT"), 10)?,
			settle_timeout_secs: parse_secs("PROBE_SETTLE_TIMEOUT", non_empty("PROBE_SETTLE_TIMEOUT"), 5)?,
			pre_fill_submit: parse_flag("PROBE_PRE_FILL_SUBMIT", non_empty("PROBE_PRE_FILL_SUBMIT"), false)?,
			base_url: non_empty("PROBE_BASE_URL"),
			username: non_empty("PROBE_USERNAME"),
			password: lookup("PROBE_PASSWORD"),
			stub_port: non_empty("STUB_PORT")
				.unwrap_or_else(|| "8000".to_string())
				.parse()
				.map_err(|_| ConfigError::InvalidPort)?,
		})
	}
}

fn parse_flag(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
	match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
		None => Ok(default),
		Some(v) => match v.as_str() {
			"1" | "true" | "yes" | "on" => Ok(true),
			"0" | "false" | "no" | "off" => Ok(false),
			_ => Err(ConfigError::InvalidFlag(key)),
		},
	}
}

/// Upper bound for any probe timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

fn parse_secs(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
	let secs = match value {
		None => return Ok(default),
		Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidNumber(key))?,
	};
	if secs > MAX_TIMEOUT_SECS {
		return Err(ConfigError::OutOfRange { key, max: MAX_TIMEOUT_SECS });
	}
	Ok(secs)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid port number")]
	InvalidPort,
	#[error("{0} must be a boolean")]
	InvalidFlag(&'static str),
	#[error("{0} must be a whole number of seconds")]
	InvalidNumber(&'static str),
	#[error("{key} must be at most {max} seconds")]
	OutOfRange { key: &'static str, max: u64 },
	#[error("Unsupported browser: {0}")]
	InvalidBrowser(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
		let vars: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Config::from_lookup(|key| vars.get(key).cloned())
	}

	#[test]
	fn defaults_apply_when_environment_is_empty() {
		let config = config_from(&[]).unwrap();
		assert_eq!(config.database_path, PathBuf::from("data/data.db"));
		assert_eq!(config.webdriver_url, "http://localhost:4444");
		assert_eq!(config.browser, Browser::Chrome);
		assert!(config.headless);
		assert!(!config.pre_fill_submit);
		assert_eq!(config.ready_timeout_secs, 10);
		assert_eq!(config.settle_timeout_secs, 5);
		assert_eq!(config.stub_port, 8000);
		assert!(config.base_url.is_none());
		assert!(config.password.is_none());
	}

	#[test]
	fn values_are_read_from_lookup() {
		let config = config_from(&[
			("DATABASE_PATH", "/tmp/registry.db"),
			("PROBE_BROWSER", "Firefox"),
			("PROBE_HEADLESS", "no"),
			("PROBE_PRE_FILL_SUBMIT", "1"),
			("PROBE_BASE_URL", "http://127.0.0.1:8000"),
			("STUB_PORT", "9001"),
		])
		.unwrap();
		assert_eq!(config.database_path, PathBuf::from("/tmp/registry.db"));
		assert_eq!(config.browser, Browser::Firefox);
		assert!(!config.headless);
		assert!(config.pre_fill_submit);
		assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:8000"));
		assert_eq!(config.stub_port, 9001);
	}

	#[test]
	fn invalid_values_are_rejected() {
		assert!(matches!(config_from(&[("STUB_PORT", "eighty")]), Err(ConfigError::InvalidPort)));
		assert!(matches!(
			config_from(&[("PROBE_HEADLESS", "maybe")]),
			Err(ConfigError::InvalidFlag("PROBE_HEADLESS"))
		));
		assert!(matches!(
			config_from(&[("PROBE_READY_TIMEOUT", "-3")]),
			Err(ConfigError::InvalidNumber("PROBE_READY_TIMEOUT"))
		));
		assert!(matches!(
			config_from(&[("PROBE_BROWSER", "netscape")]),
			Err(ConfigError::InvalidBrowser(_))
		));
	}

	#[test]
	fn timeouts_are_capped() {
		assert!(matches!(
			config_from(&[("PROBE_SETTLE_TIMEOUT", "18446744073709551615")]),
			Err(ConfigError::OutOfRange { key: "PROBE_SETTLE_TIMEOUT", max: MAX_TIMEOUT_SECS })
		));
		assert!(matches!(
			config_from(&[("PROBE_READY_TIMEOUT", "3601")]),
			Err(ConfigError::OutOfRange { key: "PROBE_READY_TIMEOUT", .. })
		));

		let config = config_from(&[("PROBE_READY_TIMEOUT", "3600")]).unwrap();
		assert_eq!(config.ready_timeout_secs, MAX_TIMEOUT_SECS);
	}
}
