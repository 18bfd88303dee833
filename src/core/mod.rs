pub mod aggregator;
pub mod batch;
pub mod engine;
pub mod frame;
pub mod parser;
pub mod render;

pub use crate::domain::model::{GroupKey, GroupedBatch, ParsedMessage, RawFrame, RenderedGroup};
pub use crate::domain::ports::{ConfigProvider, Notifier};
pub use crate::utils::error::Result;
