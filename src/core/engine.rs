use crate::adapters::logplex::DrainRequest;
use crate::core::batch::BatchProcessor;
use crate::core::render::render_groups;
use crate::domain::model::DrainReport;
use crate::domain::ports::{ConfigProvider, Notifier};
use crate::utils::error::Result;
use std::time::Instant;

/// request → batch → render → notify
pub struct DrainEngine<N: Notifier, C: ConfigProvider> {
    notifier: N,
    config: C,
    processor: BatchProcessor,
}

impl<N: Notifier, C: ConfigProvider> DrainEngine<N, C> {
    pub fn new(notifier: N, config: C) -> Self {
        Self {
            notifier,
            config,
            processor: BatchProcessor::new(),
        }
    }

    /// 處理一個 HTTPS drain 請求
    pub async fn handle(&self, request: DrainRequest) -> Result<DrainReport> {
        let envelope = request.into_envelope(&self.config)?;
        tracing::info!(
            frame_id = envelope.frame_id.as_deref().unwrap_or("-"),
            "Received logplex batch: {} bytes, {} messages announced",
            envelope.payload.len(),
            envelope.expected_frame_count
        );

        self.run(&envelope.payload, envelope.expected_frame_count)
            .await
    }

    pub async fn run(&self, payload: &[u8], expected_frame_count: usize) -> Result<DrainReport> {
        let started = Instant::now();

        let batch = match self.processor.process(payload, expected_frame_count) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!("❌ Batch rejected: {}", e);
                return Err(e.into());
            }
        };
        tracing::info!(
            "Parsed {} messages into {} groups",
            batch.line_count(),
            batch.len()
        );

        let rendered = render_groups(&batch);
        self.notifier.notify(&rendered).await?;

        let report = DrainReport {
            frames: batch.line_count(),
            groups: rendered.len(),
            elapsed_ms: started.elapsed().as_millis(),
        };
        tracing::info!("✅ Batch delivered in {}ms", report.elapsed_ms);

        Ok(report)
    }
}
