//! 作业调度协作方（JobScheduler）
//!
//! 定义事件引擎对外部异步作业设施的最小依赖：
//! - `ScheduledJob`：提交给调度器的作业形态（派发者身份、队列、事件名、载荷）；
//! - `JobScheduler`：立即/定时提交、按精确时间点列举待执行作业、幂等删除。
//!
//! 该模块仅定义协议与内存实现，可对接任意具备至少一次执行语义的作业系统。

mod inmemory;
mod job;

pub use inmemory::InMemoryScheduler;
pub use job::ScheduledJob;

use crate::error::ReactorResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 作业调度器：事件的异步执行边界
#[async_trait]
pub trait JobScheduler: Send + Sync {
    /// 提交立即执行的作业
    async fn submit_immediate(&self, job: ScheduledJob) -> ReactorResult<()>;

    /// 提交在 `at` 时刻执行的延迟作业
    async fn submit_at(&self, at: DateTime<Utc>, job: ScheduledJob) -> ReactorResult<()>;

    /// 列举恰好计划在 `at` 时刻执行的作业；时间比较精确到调度器持久化的精度
    async fn list_scheduled_at(&self, at: DateTime<Utc>) -> ReactorResult<Vec<ScheduledJob>>;

    /// 删除一个待执行作业；作业已不存在时为无操作而非错误
    async fn delete_scheduled(&self, job: &ScheduledJob) -> ReactorResult<()>;
}
