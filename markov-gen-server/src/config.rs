use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

/// Environment variable holding the configuration file path.
pub const CONFIG_ENV: &str = "MARKOV_GEN_CONFIG";

/// Configuration file used when `CONFIG_ENV` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./markov-gen.json";

/// Server configuration.
///
/// Every field is optional in the JSON file; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Address to bind.
	pub host: String,
	pub port: u16,
	/// Folder containing the `.txt` sources.
	pub data_path: PathBuf,
	/// Order of the chains built by the server.
	pub order: usize,
	/// Number of tokens generated when the request does not say.
	pub default_length: usize,
	/// Largest length a generation request may ask for.
	pub max_length: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			data_path: PathBuf::from("./data"),
			order: 3,
			default_length: 200,
			max_length: 100_000,
		}
	}
}

impl Config {
	/// Loads the configuration from the file named by `CONFIG_ENV`, or
	/// `DEFAULT_CONFIG_PATH`.
	///
	/// A missing file falls back to the defaults. A file that exists but
	/// cannot be parsed is an error.
	pub fn get() -> Result<Self, Box<dyn std::error::Error>> {
		let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
		Self::get_from_path(path)
	}

	pub fn get_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
		let path = path.as_ref();
		if !path.exists() {
			log::warn!("No configuration at {}, using defaults", path.display());
			return Ok(Self::default());
		}

		let config: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
		if config.order < 1 {
			return Err(format!("Invalid order in {}: must be >= 1", path.display()).into());
		}
		if config.default_length > config.max_length {
			return Err(format!("Invalid lengths in {}: default_length exceeds max_length", path.display()).into());
		}
		log::info!("Loaded configuration from {}", path.display());
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn write_config(name: &str, contents: &str) -> PathBuf {
		let path = env::temp_dir().join(format!("markov-gen-{}-{}.json", name, std::process::id()));
		fs::write(&path, contents).unwrap();
		path
	}

	#[test]
	fn missing_file_gives_defaults() {
		let config = Config::get_from_path("./no/such/config.json").unwrap();
		assert_eq!(config, Config::default());
	}

	#[test]
	fn partial_file_keeps_other_defaults() {
		let path = write_config("partial", r#"{ "port": 8080, "order": 2 }"#);
		let config = Config::get_from_path(&path).unwrap();

		assert_eq!(config.port, 8080);
		assert_eq!(config.order, 2);
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.default_length, 200);
		assert_eq!(config.max_length, 100_000);

		fs::remove_file(path).unwrap();
	}

	#[test]
	fn zero_order_is_rejected() {
		let path = write_config("zero", r#"{ "order": 0 }"#);
		assert!(Config::get_from_path(&path).is_err());
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn default_length_above_max_is_rejected() {
		let path = write_config("lengths", r#"{ "default_length": 50, "max_length": 10 }"#);
		assert!(Config::get_from_path(&path).is_err());
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn malformed_file_is_an_error() {
		let path = write_config("malformed", "{ port: ");
		assert!(Config::get_from_path(&path).is_err());
		fs::remove_file(path).unwrap();
	}
}
