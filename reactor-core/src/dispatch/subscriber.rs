//! 订阅者能力协议（Subscriber）

use crate::event::EventData;
use async_trait::async_trait;

/// 订阅者：根据事件数据自行决定是否以及如何响应
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// 订阅者名称（用于失败标记与审计）
    fn subscriber_name(&self) -> &str;

    /// 处理一次事件分发；是否实际行动由实现依据 `data` 内部裁决
    async fn perform_where_needed(&self, data: &EventData) -> anyhow::Result<()>;
}
