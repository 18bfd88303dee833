// Adapters layer: concrete implementations for external systems (drain transport, notification sinks).

pub mod logplex;
pub mod notify;

pub use logplex::{BatchEnvelope, DrainRequest, LOGPLEX_CONTENT_TYPE};
pub use notify::{SlackWebhookNotifier, StdoutNotifier};
