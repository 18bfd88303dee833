use crate::adapters::logplex::LOGPLEX_CONTENT_TYPE;
use crate::core::ConfigProvider;
use crate::utils::error::{DrainError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrainConfig {
    #[serde(default)]
    pub drain: DrainSection,
    pub notify: Option<NotifySection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainSection {
    #[serde(default = "default_require_https")]
    pub require_https: bool,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl Default for DrainSection {
    fn default() -> Self {
        Self {
            require_https: default_require_https(),
            content_type: default_content_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifySection {
    pub webhook_url: Option<String>,
}

fn default_require_https() -> bool {
    true
}

fn default_content_type() -> String {
    LOGPLEX_CONTENT_TYPE.to_string()
}

impl DrainConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DrainError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SLACK_WEBHOOK_URL}),未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrainError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_webhook_url(mut self, webhook_url: Option<String>) -> Self {
        if let Some(url) = webhook_url {
            self.notify = Some(NotifySection {
                webhook_url: Some(url),
            });
        }
        self
    }
}

impl ConfigProvider for DrainConfig {
    fn webhook_url(&self) -> Option<&str> {
        self.notify.as_ref()?.webhook_url.as_deref()
    }

    fn require_https(&self) -> bool {
        self.drain.require_https
    }

    fn expected_content_type(&self) -> &str {
        &self.drain.content_type
    }
}

impl Validate for DrainConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("drain.content_type", &self.drain.content_type)?;
        if let Some(url) = self.webhook_url() {
            validate_url("notify.webhook_url", url)?;
        }

        tracing::debug!("✅ Drain configuration validation passed");
        Ok(())
    }
}
