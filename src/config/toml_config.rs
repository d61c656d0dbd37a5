use crate::config::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE};
use crate::core::{ConfigProvider, FetcherKind};
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::{
    validate_path, validate_port, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub target: TargetConfig,
    pub output: Option<OutputConfig>,
    pub fetch: Option<FetchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub url: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub fetcher: Option<FetcherKind>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FetchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FetchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Command-line values win over the file when given.
    pub fn apply_overrides(&mut self, fetcher: Option<FetcherKind>, port: Option<u16>) {
        if let Some(fetcher) = fetcher {
            self.fetch.get_or_insert_with(FetchConfig::default).fetcher = Some(fetcher);
            tracing::info!("Fetcher overridden to: {}", fetcher);
        }
        if let Some(port) = port {
            self.target.port = Some(port);
            tracing::info!("Port overridden to: {}", port);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn target_url(&self) -> &str {
        self.target.url.as_deref().unwrap_or_default()
    }

    fn port_override(&self) -> Option<u16> {
        self.target.port
    }

    fn output_dir(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.directory.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    fn output_file(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.filename.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn fetcher(&self) -> FetcherKind {
        self.fetch
            .as_ref()
            .and_then(|f| f.fetcher)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let url = validate_required_field("target.url", &self.target.url)?;
        validate_url("target.url", url)?;
        validate_port("target.port", self.target.port)?;
        validate_path("output.directory", self.output_dir())?;
        validate_path("output.filename", self.output_file())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::locator_from;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[target]
url = "http://example.com/docs/"
port = 8080

[output]
directory = "./out"
filename = "docs.txt"

[fetch]
fetcher = "connection"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir(), "./out");
        assert_eq!(config.output_file(), "docs.txt");
        assert_eq!(config.fetcher(), FetcherKind::Connection);

        let locator = locator_from(&config).unwrap();
        assert_eq!(locator.host(), "example.com");
        assert_eq!(locator.path(), "/docs/");
        assert_eq!(locator.port(), 8080);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[target]\nurl = \"http://example.com/\"\n").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir(), ".");
        assert_eq!(config.output_file(), "file.txt");
        assert_eq!(config.fetcher(), FetcherKind::Socket);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HTTP_GETTER_TEST_HOST", "mirror.example.org");

        let toml_content = r#"
[target]
url = "http://${HTTP_GETTER_TEST_HOST}/"

[output]
filename = "${HTTP_GETTER_UNSET_VARIABLE}.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.target_url(), "http://mirror.example.org/");
        assert_eq!(config.output_file(), "${HTTP_GETTER_UNSET_VARIABLE}.txt");

        std::env::remove_var("HTTP_GETTER_TEST_HOST");
    }

    #[test]
    fn test_config_validation() {
        let missing_url = TomlConfig::from_toml_str("[target]\nport = 80\n").unwrap();
        assert!(matches!(
            missing_url.validate(),
            Err(FetchError::MissingConfigError { .. })
        ));

        let bad_url = TomlConfig::from_toml_str("[target]\nurl = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_port =
            TomlConfig::from_toml_str("[target]\nurl = \"http://example.com/\"\nport = 0\n").unwrap();
        assert!(bad_port.validate().is_err());

        assert!(matches!(
            TomlConfig::from_toml_str("[target\nurl = 1"),
            Err(FetchError::ConfigValidationError { ref field, .. }) if field == "toml_parsing"
        ));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = TomlConfig::from_toml_str("[target]\nurl = \"http://example.com/\"\n").unwrap();
        config.apply_overrides(Some(FetcherKind::Connection), Some(8081));

        assert_eq!(config.fetcher(), FetcherKind::Connection);
        assert_eq!(locator_from(&config).unwrap().port(), 8081);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[target]\nurl = \"http://example.com/file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target_url(), "http://example.com/file");
    }
}
