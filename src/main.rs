use clap::Parser;
use logplex_drain::core::ConfigProvider;
use logplex_drain::domain::ports::Notifier;
use logplex_drain::utils::error::ErrorSeverity;
use logplex_drain::utils::{logger, validation::Validate};
use logplex_drain::{CliConfig, DrainEngine, PayloadFile, SlackWebhookNotifier, StdoutNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting logplex-drain CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let notifier: Box<dyn Notifier> = match config.webhook_url() {
        Some(url) => {
            tracing::info!("Posting groups to webhook");
            Box::new(SlackWebhookNotifier::new(url.to_string()))
        }
        None => Box::new(StdoutNotifier),
    };
    let engine = DrainEngine::new(notifier, config);

    let result = match PayloadFile::new(&cli.payload_file).read().await {
        Ok(payload) => engine.run(&payload, cli.expected_count).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "✅ Processed {} messages in {} groups ({}ms)",
                report.frames,
                report.groups,
                report.elapsed_ms
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Drain failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
