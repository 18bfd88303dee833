use crate::domain::model::{GroupedBatch, ParsedMessage};

/// Groups parsed messages by severity, source and appname for one batch.
#[derive(Debug, Default)]
pub struct Aggregator {
    batch: GroupedBatch,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ParsedMessage) {
        let line = record.render_line();
        self.batch.push(record.group_key(), line);
    }

    pub fn len(&self) -> usize {
        self.batch.line_count()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Hands out the grouped lines and leaves the aggregator empty.
    pub fn finalize(&mut self) -> GroupedBatch {
        std::mem::take(&mut self.batch)
    }
}
