use std::path::{Path, PathBuf};

use serde::Deserialize;

use einsatz_common::mailer::MailerConfig;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Session configuration, loaded once from a YAML file and passed explicitly
/// into every client constructor. Credentials are NOT part of this file;
/// they come from the environment (`GEMINI_API_KEY`, `SMTP_PASSWORD`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the Autobahn traffic API.
    pub autobahn_api_url: String,
    /// Model identifier for the text-generation service, e.g. "gemini-pro".
    pub llm_model: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub sender_email: String,
    /// Recipient of the Einsatzhinweis mail.
    pub test_receiver_email: String,
}

impl Config {
    /// Config file location: `EINSATZ_CONFIG` if set, otherwise
    /// `config/config.yaml` relative to the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var("EINSATZ_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Loads and parses the YAML config file. Read and parse failures are
    /// fatal for the session.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read config file '{}': {e}", path.display()))
        })?;
        serde_yaml::from_str(&raw).map_err(|e| {
            AppError::Config(format!("invalid config file '{}': {e}", path.display()))
        })
    }

    /// The slice of the config the notification sender needs.
    pub fn mailer_config(&self) -> MailerConfig {
        MailerConfig {
            smtp_server: self.smtp_server.clone(),
            smtp_port: self.smtp_port,
            smtp_username: self.smtp_username.clone(),
            sender_email: self.sender_email.clone(),
            receiver_email: self.test_receiver_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_YAML: &str = "\
autobahn_api_url: https://verkehr.autobahn.de/o/autobahn
llm_model: gemini-pro
smtp_server: smtp.example.org
smtp_port: 587
smtp_username: wache@example.org
sender_email: assistent@example.org
test_receiver_email: bereitschaft@example.org
";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_temp(VALID_YAML);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.autobahn_api_url, "https://verkehr.autobahn.de/o/autobahn");
        assert_eq!(config.llm_model, "gemini-pro");
        assert_eq!(config.smtp_port, 587);

        let mailer = config.mailer_config();
        assert_eq!(mailer.receiver_email, "bereitschaft@example.org");
        assert_eq!(mailer.sender_email, "assistent@example.org");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let file = write_temp("autobahn_api_url: [not, closed");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_required_key_is_config_error() {
        let file = write_temp("autobahn_api_url: https://example.org\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
