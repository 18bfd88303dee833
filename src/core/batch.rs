use crate::core::aggregator::Aggregator;
use crate::core::frame::FrameSplitter;
use crate::core::parser::MessageParser;
use crate::domain::model::GroupedBatch;
use crate::utils::error::BatchError;

/// Runs one logplex batch through framing, parsing and grouping.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    parser: MessageParser,
}

impl BatchProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(
        &self,
        payload: &[u8],
        expected_frame_count: usize,
    ) -> Result<GroupedBatch, BatchError> {
        // 每個批次都用新的 aggregator,避免狀態跨批次殘留
        let mut aggregator = Aggregator::new();
        let mut actual = 0;

        for frame in FrameSplitter::new(payload) {
            let frame = frame?;
            tracing::debug!(
                "Parsing frame {} ({} bytes at offset {})",
                frame.index,
                frame.declared_len(),
                frame.offset
            );

            let record = self
                .parser
                .parse(frame.text)
                .map_err(|cause| BatchError::Parsing {
                    index: frame.index,
                    cause,
                })?;

            aggregator.add(record);
            actual = frame.index;
        }

        if actual != expected_frame_count {
            return Err(BatchError::CountMismatch {
                expected: expected_frame_count,
                actual,
            });
        }

        let batch = aggregator.finalize();
        tracing::debug!("Grouped {} frames into {} groups", actual, batch.len());
        Ok(batch)
    }
}
