use std::{
	fs, io,
	path::{Path, PathBuf},
	time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("could not read {path}: {source}")]
	Read { path: PathBuf, source: io::Error },

	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Console settings, read from `config.toml` in the data directory.
/// Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
	pub api_base: String,
	pub request_timeout_secs: u64,
	pub notification_ttl_secs: u64,
	pub download_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
	fn default() -> Self {
		Self {
			api_base: "http://localhost:8000".into(),
			request_timeout_secs: 30,
			notification_ttl_secs: 6,
			download_dir: None,
		}
	}
}

impl ConsoleConfig {
	/// Load from the data directory; a missing file yields defaults.
	pub fn load() -> Result<Self, ConfigError> {
		Self::load_from(&data_dir().join(CONFIG_FILE))
	}

	pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
		match fs::read_to_string(path) {
			Ok(text) => Self::parse(&text),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
			Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
		}
	}

	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	pub fn notification_ttl(&self) -> Duration {
		Duration::from_secs(self.notification_ttl_secs)
	}

	/// Where downloaded reports land: configured dir, else the user's
	/// Downloads folder, else the data directory.
	pub fn report_dir(&self) -> PathBuf {
		self.download_dir
			.clone()
			.or_else(dirs::download_dir)
			.unwrap_or_else(data_dir)
	}
}

/// Per-user application data directory (logs, config).
pub fn data_dir() -> PathBuf {
	dirs::data_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join("Batchpay")
}
