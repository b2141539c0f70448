use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
	pub server_host: String,
	pub server_port: u16,
	pub questions_path: PathBuf,
	pub users_path: PathBuf,
	pub companion_url: String,
	pub companion_link_url: String,
	pub probe_timeout_secs: u64,
}

impl Config {
	pub fn from_env() -> Result<Self, ConfigError> {
		Ok(Self {
			server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
			server_port: env::var("SERVER_PORT")
				.unwrap_or_else(|_| "8080".to_string())
				.parse()
				.map_err(|_| ConfigError::InvalidPort)?,
			questions_path: env::var("QUESTIONS_FILE")
				.unwrap_or_else(|_| "data/questions_en.csv".to_string())
				.into(),
			users_path: env::var("USERS_FILE")
				.unwrap_or_else(|_| "data/registered_users.json".to_string())
				.into(),
			companion_url: env::var("COMPANION_URL")
				.unwrap_or_else(|_| "http://localhost:8501".to_string()),
			companion_link_url: env::var("COMPANION_LINK_URL")
				.unwrap_or_else(|_| "https://may-25-bmlops-fastapi.streamlit.app/".to_string()),
			probe_timeout_secs: env::var("PROBE_TIMEOUT_SECS")
				.unwrap_or_else(|_| "3".to_string())
				.parse()
				.map_err(|_| ConfigError::InvalidProbeTimeout)?,
		})
	}

	pub fn server_addr(&self) -> String {
		format!("{}:{}", self.server_host, self.server_port)
	}

	pub fn probe_timeout(&self) -> Duration {
		Duration::from_secs(self.probe_timeout_secs)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid port number")]
	InvalidPort,
	#[error("Invalid probe timeout")]
	InvalidProbeTimeout,
}
