//! 校验策略（Validator）
//!
//! 发布前对信封执行的单一全局策略，在构造分发器时显式注入；
//! 默认策略不做任何校验（`permissive`）。

use crate::error::ReactorResult;
use crate::event::Event;
use std::sync::Arc;

/// 校验策略：拒绝时以 `Validation` 错误中止发布，无任何副作用
pub type Validator = Arc<dyn Fn(&Event) -> ReactorResult<()> + Send + Sync>;

/// 默认策略：放行一切
pub fn permissive() -> Validator {
    Arc::new(|_event| Ok(()))
}
