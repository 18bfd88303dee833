pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::DrainConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "logplex-drain")]
#[command(about = "Split, parse and group a logplex syslog batch")]
pub struct CliConfig {
    /// File holding the octet-counted batch body
    #[arg(long)]
    pub payload_file: String,

    /// Value of the Logplex-Msg-Count header
    #[arg(long)]
    pub expected_count: usize,

    /// Slack incoming webhook; groups are printed to stdout when unset
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (if any) and applies command line overrides.
    pub fn resolve(&self) -> Result<DrainConfig> {
        let config = match &self.config {
            Some(path) => DrainConfig::from_file(path)?,
            None => DrainConfig::default(),
        };
        Ok(config.with_webhook_url(self.webhook_url.clone()))
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("payload_file", &self.payload_file)?;
        if let Some(url) = &self.webhook_url {
            validate_url("webhook_url", url)?;
        }
        Ok(())
    }
}
