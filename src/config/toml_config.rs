use crate::core::{BackendKind, ConfigProvider};
use crate::utils::error::{HospitalError, Result};
use crate::utils::validation::{
    validate_one_of, validate_positive_number, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    pub seed_sample_data: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            base_url: None,
            timeout_seconds: 10,
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl HospitalConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HospitalError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HospitalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOSPITAL_API_URL})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HospitalError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於設定檔；指定 base_url 即改用遠端後端
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
        json_logs: bool,
    ) {
        if let Some(url) = base_url {
            self.backend.kind = BackendKind::Remote;
            self.backend.base_url = Some(url);
        }
        if let Some(timeout) = timeout_seconds {
            self.backend.timeout_seconds = timeout;
        }
        if json_logs {
            self.logging.format = "json".to_string();
        }
    }
}

impl Validate for HospitalConfig {
    fn validate(&self) -> Result<()> {
        if self.backend.kind == BackendKind::Remote {
            let url = validate_required_field("backend.base_url", &self.backend.base_url)?;
            validate_url("backend.base_url", url)?;
        }

        validate_positive_number("backend.timeout_seconds", self.backend.timeout_seconds, 1)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;

        Ok(())
    }
}

impl ConfigProvider for HospitalConfig {
    fn backend_kind(&self) -> BackendKind {
        self.backend.kind
    }

    fn base_url(&self) -> Option<&str> {
        self.backend.base_url.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_seconds)
    }

    fn seed_sample_data(&self) -> bool {
        self.backend.seed_sample_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = HospitalConfig::from_toml_str("").unwrap();
        assert_eq!(config, HospitalConfig::default());
        assert_eq!(config.backend_kind(), BackendKind::Memory);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.seed_sample_data());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_remote_config() {
        let toml_content = r#"
[backend]
kind = "remote"
base_url = "http://10.0.2.2:8080/"
timeout_seconds = 3

[logging]
level = "debug"
format = "json"
"#;

        let config = HospitalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend_kind(), BackendKind::Remote);
        assert_eq!(config.base_url(), Some("http://10.0.2.2:8080/"));
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.logging.is_json());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FATFOX_TEST_API_URL", "https://hospital.test");

        let toml_content = r#"
[backend]
kind = "remote"
base_url = "${FATFOX_TEST_API_URL}"
"#;

        let config = HospitalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), Some("https://hospital.test"));

        std::env::remove_var("FATFOX_TEST_API_URL");
    }

    #[test]
    fn test_config_validation() {
        let remote_without_url = HospitalConfig::from_toml_str("[backend]\nkind = \"remote\"").unwrap();
        assert!(matches!(
            remote_without_url.validate(),
            Err(HospitalError::MissingConfigError { .. })
        ));

        let bad_url =
            HospitalConfig::from_toml_str("[backend]\nkind = \"remote\"\nbase_url = \"invalid-url\"")
                .unwrap();
        assert!(bad_url.validate().is_err());

        let zero_timeout = HospitalConfig::from_toml_str("[backend]\ntimeout_seconds = 0").unwrap();
        assert!(zero_timeout.validate().is_err());

        let bad_format = HospitalConfig::from_toml_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_kind_fails_to_parse() {
        assert!(HospitalConfig::from_toml_str("[backend]\nkind = \"sqlite\"").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = HospitalConfig::default();
        config.apply_overrides(Some("http://localhost:8080".to_string()), Some(2), true);
        assert_eq!(config.backend_kind(), BackendKind::Remote);
        assert_eq!(config.base_url(), Some("http://localhost:8080"));
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[backend]\nseed_sample_data = false\n")
            .unwrap();

        let config = HospitalConfig::from_file(temp_file.path()).unwrap();
        assert!(!config.seed_sample_data());
    }
}
