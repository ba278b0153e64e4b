//! 重调度/取消协议（reschedule）
//!
//! 在外部调度器中定位此前计划的同一逻辑事件并删除，可选地发布替代发生：
//! - 定位以 `Fingerprint` 为依据：派发者身份、事件名、原计划时间，
//!   以及可选的触发者类型+标识；
//! - 时间匹配精确到调度器持久化的精度（含亚秒），不精确即视为无匹配；
//! - 删除是尽力而为的比较后删除，作业已不存在时为无操作；
//! - 未提供触发者且多个待执行作业同名时，匹配存在歧义，此时命中首个
//!   候选——这是已知局限，调用方可自行构造更严格的指纹做筛选。

use super::dispatcher::{ACTOR_KEY, DISPATCHER_IDENTITY, EventDispatcher};
use crate::error::{ReactorError, ReactorResult};
use crate::event::{EntityRef, EventData, SCHEDULED_AT_KEY};
use crate::scheduler::ScheduledJob;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// 原计划时间的属性名（重调度请求必填）
const WAS_KEY: &str = "was";
/// 条件描述符属性，重新发布前剥除
const IF_KEY: &str = "if";

/// 调度作业指纹：用于在外部调度器中定位一次此前计划的事件发生
#[derive(Debug, Clone, Builder)]
pub struct Fingerprint {
    /// 派发者身份
    dispatcher: String,
    /// 事件名
    event_name: String,
    /// 可选的触发者判别；缺失时仅按事件名匹配
    actor: Option<EntityRef>,
    /// 原计划时间（精确匹配）
    scheduled_at: DateTime<Utc>,
}

impl Fingerprint {
    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    /// 候选作业是否与指纹相符
    pub fn matches(&self, job: &ScheduledJob) -> bool {
        if job.dispatcher() != self.dispatcher || job.event_name() != self.event_name {
            return false;
        }

        match &self.actor {
            // 无触发者判别时按事件名匹配即可；同名多作业下可能命中他者
            None => true,
            Some(actor) => {
                let payload = job.payload();
                payload.get("actor_type").and_then(Value::as_str) == Some(actor.entity_type())
                    && payload.get("actor_id").and_then(Value::as_str) == Some(actor.entity_id())
            }
        }
    }
}

impl EventDispatcher {
    /// 重调度：按指纹定位并删除 `was` 时刻的待执行作业，
    /// 若 `at` 严格在未来则发布替代发生，否则仅取消。
    /// 找不到匹配作业不是错误；删除后发布照常进行。
    pub async fn reschedule(&self, name: &str, mut data: EventData) -> ReactorResult<()> {
        let was = data.get_time(WAS_KEY)?.ok_or_else(|| ReactorError::MalformedEvent {
            reason: "reschedule requires a `was` timestamp".to_string(),
        })?;

        let fingerprint = Fingerprint::builder()
            .dispatcher(DISPATCHER_IDENTITY.to_string())
            .event_name(name.to_string())
            .maybe_actor(data.entity_ref(ACTOR_KEY))
            .scheduled_at(was)
            .build();

        let candidates = self.scheduler().list_scheduled_at(was).await?;
        if let Some(job) = candidates.iter().find(|job| fingerprint.matches(job)) {
            debug!(event = name, was = %was, "cancelling scheduled occurrence");
            self.scheduler().delete_scheduled(job).await?;
        }

        let at = data.get_time(SCHEDULED_AT_KEY)?;
        data.remove(WAS_KEY);
        data.remove(IF_KEY);

        if at.is_some_and(|at| at > Utc::now()) {
            self.publish(name, data).await?;
        }

        Ok(())
    }
}
