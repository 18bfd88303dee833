#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use logplex_drain::core::ConfigProvider;
#[cfg(feature = "lambda")]
use logplex_drain::domain::ports::Notifier;
#[cfg(feature = "lambda")]
use logplex_drain::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use logplex_drain::{DrainEngine, DrainRequest, LambdaConfig, SlackWebhookNotifier, StdoutNotifier};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use std::collections::HashMap;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub is_base64_encoded: bool,
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl Response {
    fn empty(status_code: u16) -> Self {
        Self {
            is_base64_encoded: false,
            status_code,
            headers: HashMap::from([("Content-Length".to_string(), "0".to_string())]),
            body: String::new(),
        }
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    engine: &DrainEngine<Box<dyn Notifier>, LambdaConfig>,
    event: LambdaEvent<DrainRequest>,
) -> Result<Response, Error> {
    let request_id = event.context.request_id.clone();
    tracing::info!(request_id = %request_id, "Handling logplex drain request");

    match engine.handle(event.payload).await {
        Ok(report) => {
            tracing::info!(
                request_id = %request_id,
                frames = report.frames,
                groups = report.groups,
                "Drain request completed"
            );
            Ok(Response::empty(200))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                category = ?e.category(),
                "❌ Drain request failed: {}",
                e
            );
            Ok(Response::empty(e.status_code()))
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let notifier: Box<dyn Notifier> = match config.webhook_url() {
        Some(url) => Box::new(SlackWebhookNotifier::new(url.to_string())),
        None => Box::new(StdoutNotifier),
    };
    let engine = DrainEngine::new(notifier, config);
    let engine_ref = &engine;

    run(service_fn(move |event: LambdaEvent<DrainRequest>| async move {
        function_handler(engine_ref, event).await
    }))
    .await
}
