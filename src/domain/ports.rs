use crate::domain::model::RenderedGroup;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> Option<&str>;
    fn require_https(&self) -> bool;
    fn expected_content_type(&self) -> &str;
}

/// 將渲染後的群組送到通知端 (stdout, Slack webhook ...)
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, groups: &[RenderedGroup]) -> Result<()>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Box<N> {
    async fn notify(&self, groups: &[RenderedGroup]) -> Result<()> {
        (**self).notify(groups).await
    }
}
