//! 实体仓储协作方（EntityStore）
//!
//! 定义事件引擎对实体持久化层的最小依赖：
//! - `EntityStore`：按类型与 ID 做不受软删除可见性约束的查找；
//! - `Entity`：暴露类型/标识，以及按事件名登记的触发条件；
//! - `EventCondition`：触发条件描述符（可调用体或具名谓词，缺省即恒触发）。
//!
//! 本模块仅定义协议，不绑定任何存储实现。

use crate::error::ReactorResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// 触发条件描述符：决定某实体的某类事件是否真正分发
#[derive(Clone)]
pub enum EventCondition {
    /// 以实体为上下文执行的可调用体，返回是否触发
    Callable(Arc<dyn Fn(&dyn Entity) -> bool + Send + Sync>),
    /// 实体上的具名谓词，经 `Entity::evaluate_predicate` 求值
    Predicate(String),
}

impl fmt::Debug for EventCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCondition::Callable(_) => f.write_str("EventCondition::Callable(..)"),
            EventCondition::Predicate(name) => {
                f.debug_tuple("EventCondition::Predicate").field(name).finish()
            }
        }
    }
}

/// 可被事件引用的实体
pub trait Entity: Send + Sync {
    /// 实体类型标识（引用编码中的 `_type` 部分）
    fn entity_type(&self) -> &str;

    /// 实体标识（引用编码中的 `_id` 部分）
    fn entity_id(&self) -> String;

    /// 该实体类型为 `event_name` 登记的触发条件；未登记即恒触发
    fn registered_condition(&self, event_name: &str) -> Option<EventCondition>;

    /// 对具名谓词求值（`EventCondition::Predicate` 的分派入口）
    fn evaluate_predicate(&self, name: &str) -> ReactorResult<bool>;
}

/// 实体仓储：按类型与 ID 查找实体
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// 不受软删除/可见性过滤约束的查找；找不到时返回 `Lookup` 错误
    async fn find_unscoped(&self, entity_type: &str, id: &str) -> ReactorResult<Arc<dyn Entity>>;
}
