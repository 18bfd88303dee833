use crate::adapters::logplex::LOGPLEX_CONTENT_TYPE;
use crate::core::ConfigProvider;
use crate::utils::error::{DrainError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub webhook_url: Option<String>,
    pub require_https: bool,
    pub content_type: String,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require_https = match lookup("REQUIRE_HTTPS") {
            None => true,
            Some(value) => parse_bool(&value).ok_or_else(|| DrainError::InvalidConfigValueError {
                field: "REQUIRE_HTTPS".to_string(),
                value: value.clone(),
                reason: "expected true or false".to_string(),
            })?,
        };

        Ok(Self {
            webhook_url: lookup("SLACK_WEBHOOK_URL").filter(|url| !url.is_empty()),
            require_https,
            content_type: lookup("LOGPLEX_CONTENT_TYPE")
                .unwrap_or_else(|| LOGPLEX_CONTENT_TYPE.to_string()),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl ConfigProvider for LambdaConfig {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    fn require_https(&self) -> bool {
        self.require_https
    }

    fn expected_content_type(&self) -> &str {
        &self.content_type
    }
}

impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        // 驗證 webhook URL
        if let Some(url) = &self.webhook_url {
            validate_url("SLACK_WEBHOOK_URL", url)?;
        }

        validate_non_empty_string("LOGPLEX_CONTENT_TYPE", &self.content_type)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LambdaConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.require_https());
        assert_eq!(config.webhook_url(), None);
        assert_eq!(config.expected_content_type(), LOGPLEX_CONTENT_TYPE);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("REQUIRE_HTTPS", "false"),
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/x"),
        ])
        .unwrap();

        assert!(!config.require_https());
        assert_eq!(
            config.webhook_url(),
            Some("https://hooks.slack.com/services/x")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_require_https() {
        assert!(matches!(
            config_from(&[("REQUIRE_HTTPS", "maybe")]).unwrap_err(),
            DrainError::InvalidConfigValueError { .. }
        ));
    }

    #[test]
    fn test_invalid_webhook_fails_validation() {
        let config = config_from(&[("SLACK_WEBHOOK_URL", "ftp://example.com")]).unwrap();
        assert!(config.validate().is_err());
    }
}
