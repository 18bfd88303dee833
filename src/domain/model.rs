use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One octet-counted frame, borrowed from the batch payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    /// 1-based position within the batch
    pub index: usize,
    /// Byte offset of the length token in the payload
    pub offset: usize,
    pub text: &'a str,
}

impl RawFrame<'_> {
    pub fn declared_len(&self) -> usize {
        self.text.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub priority: u8,
    pub severity: u8,
    pub facility: u8,
    pub version: u32,
    pub timestamp: DateTime<FixedOffset>,
    pub hostname: String,
    pub source: String,
    pub appname: String,
    pub message: String,
}

impl ParsedMessage {
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            severity: self.severity,
            source: self.source.clone(),
            appname: self.appname.clone(),
        }
    }

    /// `"<timestamp>: <message>"`
    pub fn render_line(&self) -> String {
        format!(
            "{}: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            self.message
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub severity: u8,
    pub source: String,
    pub appname: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SEV:{} {} {}", self.severity, self.source, self.appname)
    }
}

/// Lines grouped by [`GroupKey`], keys kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedBatch {
    groups: Vec<(GroupKey, Vec<String>)>,
    index: HashMap<GroupKey, usize>,
}

impl GroupedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: GroupKey, line: String) {
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(line),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![line]));
            }
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[String])> {
        self.groups
            .iter()
            .map(|(key, lines)| (key, lines.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.groups.iter().map(|(_, lines)| lines.len()).sum()
    }
}

/// 一個群組渲染後的文字,交給通知端
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGroup {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrainReport {
    pub frames: usize,
    pub groups: usize,
    pub elapsed_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(severity: u8, source: &str, appname: &str) -> GroupKey {
        GroupKey {
            severity,
            source: source.to_string(),
            appname: appname.to_string(),
        }
    }

    #[test]
    fn test_grouped_batch_keeps_first_seen_order() {
        let mut batch = GroupedBatch::new();
        batch.push(key(3, "app", "worker"), "a".to_string());
        batch.push(key(6, "app", "web"), "b".to_string());
        batch.push(key(3, "app", "worker"), "c".to_string());

        let keys: Vec<_> = batch.keys().cloned().collect();
        assert_eq!(keys, vec![key(3, "app", "worker"), key(6, "app", "web")]);
        assert_eq!(
            batch.get(&key(3, "app", "worker")).unwrap(),
            &["a".to_string(), "c".to_string()]
        );
        assert_eq!(batch.line_count(), 3);
    }

    #[test]
    fn test_group_key_display() {
        assert_eq!(key(4, "heroku", "router").to_string(), "SEV:4 heroku router");
    }

    #[test]
    fn test_render_line_uses_rfc3339() {
        let msg = ParsedMessage {
            priority: 134,
            severity: 6,
            facility: 16,
            version: 1,
            timestamp: DateTime::parse_from_rfc3339("2020-01-01T00:00:00.250+02:00").unwrap(),
            hostname: "host1".to_string(),
            source: "app".to_string(),
            appname: "web".to_string(),
            message: "hello".to_string(),
        };

        assert_eq!(msg.render_line(), "2020-01-01T00:00:00.250+02:00: hello");
    }
}
