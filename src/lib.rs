pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DrainRequest, SlackWebhookNotifier, StdoutNotifier};
pub use config::{cli::PayloadFile, lambda::LambdaConfig, toml_config::DrainConfig};
pub use core::{
    aggregator::Aggregator, batch::BatchProcessor, engine::DrainEngine, frame::FrameSplitter,
    parser::MessageParser, render::render_groups,
};
pub use domain::model::{DrainReport, GroupKey, GroupedBatch, ParsedMessage, RawFrame};
pub use utils::error::{BatchError, DrainError, FrameError, ParseError, Result};
