use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub shopify: ShopifyConfig,
    pub pipedrive: PipedriveConfig,
    pub sync: SyncSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyConfig {
    /// 商店網域，例如 my-store.myshopify.com；測試時可以帶完整的 http:// URL
    pub store_domain: String,
    pub api_key: String,
    pub api_password: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipedriveConfig {
    pub api_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSection {
    pub order_id: String,
    #[serde(default = "default_deal_title")]
    pub deal_title: String,
}

fn default_api_version() -> String {
    "2021-07".to_string()
}

fn default_base_url() -> String {
    "https://api.pipedrive.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_deal_title() -> String {
    "New Deal".to_string()
}

impl SyncConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyncError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PIPEDRIVE_API_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 憑證欄位不能留白（環境變數沒替換到時會殘留 ${...} 原文）
        validation::validate_non_empty_string("shopify.store_domain", &self.shopify.store_domain)?;
        validation::validate_non_empty_string("shopify.api_key", &self.shopify.api_key)?;
        validation::validate_non_empty_string("shopify.api_password", &self.shopify.api_password)?;
        validation::validate_non_empty_string("shopify.api_version", &self.shopify.api_version)?;
        validation::validate_non_empty_string("pipedrive.api_token", &self.pipedrive.api_token)?;
        validation::validate_non_empty_string("sync.order_id", &self.sync.order_id)?;
        validation::validate_non_empty_string("sync.deal_title", &self.sync.deal_title)?;

        for (field, value) in [
            ("shopify.store_domain", &self.shopify.store_domain),
            ("shopify.api_key", &self.shopify.api_key),
            ("shopify.api_password", &self.shopify.api_password),
            ("pipedrive.api_token", &self.pipedrive.api_token),
        ] {
            if value.starts_with("${") {
                return Err(SyncError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }

        validation::validate_url("pipedrive.base_url", &self.pipedrive.base_url)?;

        validation::validate_range(
            "shopify.timeout_seconds",
            self.shopify.timeout_seconds,
            1,
            300,
        )?;
        validation::validate_range(
            "pipedrive.timeout_seconds",
            self.pipedrive.timeout_seconds,
            1,
            300,
        )?;

        Ok(())
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[shopify]
store_domain = "my-store.myshopify.com"
api_key = "key"
api_password = "pass"

[pipedrive]
api_token = "token"

[sync]
order_id = "1001"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.shopify.store_domain, "my-store.myshopify.com");
        assert_eq!(config.shopify.api_version, "2021-07");
        assert_eq!(config.pipedrive.base_url, "https://api.pipedrive.com/v1");
        assert_eq!(config.sync.order_id, "1001");
        assert_eq!(config.sync.deal_title, "New Deal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CRM_TOKEN", "secret-token");

        let toml_content = r#"
[shopify]
store_domain = "my-store.myshopify.com"
api_key = "key"
api_password = "pass"

[pipedrive]
api_token = "${TEST_CRM_TOKEN}"

[sync]
order_id = "1001"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.pipedrive.api_token, "secret-token");

        std::env::remove_var("TEST_CRM_TOKEN");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[shopify]
store_domain = "my-store.myshopify.com"
api_key = "key"
api_password = "pass"

[pipedrive]
api_token = "${THIS_VAR_DOES_NOT_EXIST_ANYWHERE}"

[sync]
order_id = "1001"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SyncError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let toml_content = r#"
[shopify]
store_domain = "my-store.myshopify.com"
api_key = "key"
api_password = "pass"

[pipedrive]
api_token = "token"
base_url = "not-a-url"

[sync]
order_id = "1001"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let toml_content = r#"
[shopify]
store_domain = "my-store.myshopify.com"
api_key = "key"
api_password = "pass"
timeout_seconds = 0

[pipedrive]
api_token = "token"

[sync]
order_id = "1001"
"#;

        let config = SyncConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[shopify]
store_domain = "file-store.myshopify.com"
api_key = "key"
api_password = "pass"

[pipedrive]
api_token = "token"

[sync]
order_id = "42"
deal_title = "Imported Deal"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SyncConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.shopify.store_domain, "file-store.myshopify.com");
        assert_eq!(config.sync.deal_title, "Imported Deal");
    }
}
