use crate::domain::ports::ConfigProvider;
use crate::utils::error::RequestError;
use base64::Engine as _;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

pub const LOGPLEX_CONTENT_TYPE: &str = "application/logplex-1";

const HEADER_PROTO: &str = "X-Forwarded-Proto";
const HEADER_CONTENT_TYPE: &str = "Content-Type";
const HEADER_MSG_COUNT: &str = "Logplex-Msg-Count";
const HEADER_FRAME_ID: &str = "Logplex-Frame-Id";
const HEADER_DRAIN_TOKEN: &str = "Logplex-Drain-Token";

/// HTTPS drain request as delivered by an API Gateway proxy integration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrainRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

// API Gateway sends `"headers": null` when the request has none
fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload plus the transport metadata the batch processor needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEnvelope {
    pub payload: Vec<u8>,
    pub expected_frame_count: usize,
    pub frame_id: Option<String>,
    pub drain_token: Option<String>,
}

impl DrainRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            headers: HashMap::new(),
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Header names are matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn require_header(&self, name: &str) -> Result<&str, RequestError> {
        self.header(name).ok_or_else(|| RequestError::MissingHeader {
            name: name.to_string(),
        })
    }

    fn expect_header(&self, name: &str, expected: &str) -> Result<(), RequestError> {
        let actual = self.require_header(name)?;
        if actual != expected {
            return Err(RequestError::UnexpectedHeader {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// 檢查傳輸層標頭並取出 payload 與預期的訊息數
    pub fn into_envelope<C: ConfigProvider + ?Sized>(
        self,
        config: &C,
    ) -> Result<BatchEnvelope, RequestError> {
        if config.require_https() {
            self.expect_header(HEADER_PROTO, "https")?;
        }
        self.expect_header(HEADER_CONTENT_TYPE, config.expected_content_type())?;

        let count = self.require_header(HEADER_MSG_COUNT)?;
        let expected_frame_count =
            count
                .trim()
                .parse::<usize>()
                .map_err(|_| RequestError::InvalidMsgCount {
                    value: count.to_string(),
                })?;

        let frame_id = self.header(HEADER_FRAME_ID).map(str::to_string);
        let drain_token = self.header(HEADER_DRAIN_TOKEN).map(str::to_string);

        let body = self.body.ok_or(RequestError::MissingBody)?;
        let payload = if self.is_base64_encoded {
            base64::engine::general_purpose::STANDARD.decode(body.as_bytes())?
        } else {
            body.into_bytes()
        };

        Ok(BatchEnvelope {
            payload,
            expected_frame_count,
            frame_id,
            drain_token,
        })
    }
}
