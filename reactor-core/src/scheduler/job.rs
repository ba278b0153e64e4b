//! 调度作业模型（ScheduledJob）

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 提交给调度器的作业：`(事件名, 序列化载荷)` 加上定位所需的元信息
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct ScheduledJob {
    /// 作业标识，构造时生成，用于幂等删除
    #[builder(default = Uuid::new_v4().to_string())]
    job_id: String,
    /// 派发者身份（重调度时的指纹匹配依据之一）
    dispatcher: String,
    /// 目标队列名
    queue: String,
    /// 事件名（作业参数之一）
    event_name: String,
    /// 序列化后的事件载荷（作业参数之二）
    payload: Value,
    /// 计划执行时间；立即作业为空
    scheduled_at: Option<DateTime<Utc>>,
}

impl ScheduledJob {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn dispatcher(&self) -> &str {
        &self.dispatcher
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }
}
