use crate::domain::model::RenderedGroup;
use crate::domain::ports::Notifier;
use crate::utils::error::{DrainError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Prints every group to stdout, one block per group.
#[derive(Debug, Clone, Default)]
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn notify(&self, groups: &[RenderedGroup]) -> Result<()> {
        for group in groups {
            println!("{}{}", group.title, group.text);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SlackMessage {
    text: String,
}

/// Posts each group to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    fn message(group: &RenderedGroup) -> SlackMessage {
        SlackMessage {
            text: format!("*{}*\n```{}```", group.title, group.text),
        }
    }
}

#[async_trait]
impl Notifier for SlackWebhookNotifier {
    async fn notify(&self, groups: &[RenderedGroup]) -> Result<()> {
        for group in groups {
            tracing::debug!("Posting group '{}' to webhook", group.title);
            let response = self
                .client
                .post(&self.webhook_url)
                .json(&Self::message(group))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Webhook rejected group '{}': {} {}", group.title, status, body);
                return Err(DrainError::NotifyStatusError {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn group(title: &str, text: &str) -> RenderedGroup {
        RenderedGroup {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_slack_notifier_posts_each_group() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .json_body(serde_json::json!({"text": "*SEV:3 app web*\n```\nt: boom```"}));
            then.status(200).body("ok");
        });

        let notifier = SlackWebhookNotifier::new(server.url("/hook"));
        notifier
            .notify(&[group("SEV:3 app web", "\nt: boom")])
            .await
            .unwrap();

        hook.assert();
    }

    #[tokio::test]
    async fn test_slack_notifier_surfaces_rejections() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(404).body("no_service");
        });

        let notifier = SlackWebhookNotifier::new(server.url("/hook"));
        let err = notifier
            .notify(&[group("a", "\nx"), group("b", "\ny")])
            .await
            .unwrap_err();

        // stops at the first failed group
        hook.assert_hits(1);
        assert!(matches!(
            err,
            DrainError::NotifyStatusError { status: 404, ref body } if body == "no_service"
        ));
    }

    #[tokio::test]
    async fn test_stdout_notifier_accepts_empty_input() {
        assert!(StdoutNotifier.notify(&[]).await.is_ok());
    }
}
