//! 事件分发器（EventDispatcher）
//!
//! 统一编排一次事件发生的完整生命周期：
//! - `publish`：守卫 → 构造信封 → 校验 → 序列化 → 提交调度器（立即或定时）；
//! - `perform`：由外部工作进程在作业执行时回调，解析触发者、求值触发条件，
//!   条件成立时按注册顺序扇出到全部订阅者；
//! - 单个订阅者的失败被隔离记录，不中断对其余订阅者的投递。
//!
//! 同一逻辑事件的并发发布不做去重，每次 `publish` 都产生独立的一次发生；
//! 需要合并时经由重调度协议显式处理。

use super::config::{DEFAULT_QUEUE, DispatchConfig};
use super::registry::SubscriberRegistry;
use super::validator::Validator;
use crate::entity::{EntityStore, EventCondition};
use crate::error::{ReactorError, ReactorResult};
use crate::event::{Event, EventData};
use crate::scheduler::{JobScheduler, ScheduledJob};
use bon::Builder;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// 提交作业时记录的派发者身份，重调度时据此识别本引擎的作业
pub const DISPATCHER_IDENTITY: &str = "reactor.event";

/// 触发者引用的属性名（线上编码为 `actor_type`/`actor_id`）
pub(crate) const ACTOR_KEY: &str = "actor";
/// 执行期盖入数据的触发时间戳
const FIRED_AT_KEY: &str = "fired_at";
/// 执行期盖入数据的事件名
const NAME_STAMP_KEY: &str = "name";
/// 生产控制台守卫的显式放行标记
const CONFIRMED_KEY: &str = "confirmed";

const CONSOLE_GUARD_MESSAGE: &str = "publishing from a production console triggers every \
subscriber of this event; set `confirmed: true` in the event data to proceed, or configure \
the REACTOR_CONSOLE_ENABLED bypass";

/// 一次 `perform` 的结果：实际触发或条件不成立而静默跳过
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 条件成立，已向 `delivered` 个订阅者投递
    Fired { delivered: usize },
    /// 条件不成立，未投递任何订阅者（正常结果，非错误）
    Skipped,
}

/// 事件分发器
#[derive(Builder)]
pub struct EventDispatcher {
    scheduler: Arc<dyn JobScheduler>,
    entity_store: Arc<dyn EntityStore>,
    registry: Arc<SubscriberRegistry>,
    #[builder(default = crate::dispatch::validator::permissive())]
    validator: Validator,
    #[builder(default)]
    config: DispatchConfig,
}

impl EventDispatcher {
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub(crate) fn scheduler(&self) -> &Arc<dyn JobScheduler> {
        &self.scheduler
    }

    /// 发布一次事件：数据携带未来的 `at` 属性时提交定时作业，否则立即作业。
    /// 返回已入队的信封（其序列化产物不受后续修改影响）。
    pub async fn publish(&self, name: &str, data: EventData) -> ReactorResult<Event> {
        self.guard_console(&data)?;

        let event = Event::new(name, data)?;
        (self.validator)(&event)?;

        let scheduled_at = event.scheduled_at()?;
        let payload = event.to_payload();
        let queue = self.config.queue_for(DEFAULT_QUEUE);

        let job = ScheduledJob::builder()
            .dispatcher(DISPATCHER_IDENTITY.to_string())
            .queue(queue.clone())
            .event_name(name.to_string())
            .payload(payload)
            .maybe_scheduled_at(scheduled_at.filter(|at| *at > Utc::now()))
            .build();

        match job.scheduled_at() {
            Some(at) => {
                debug!(event = name, queue = %queue, at = %at, "enqueue deferred event");
                self.scheduler.submit_at(at, job).await?;
            }
            None => {
                debug!(event = name, queue = %queue, "enqueue immediate event");
                self.scheduler.submit_immediate(job).await?;
            }
        }

        Ok(event)
    }

    /// 作业执行回调：求值触发条件并在成立时扇出。
    /// 触发者查找失败（`Lookup`）向工作设施传播，由其裁决重试。
    pub async fn perform(&self, name: &str, payload: Value) -> ReactorResult<DispatchOutcome> {
        let mut data = EventData::from_value(payload)?;

        let actor = data
            .resolve_entity(ACTOR_KEY, self.entity_store.as_ref())
            .await?;

        let need_to_fire = match &actor {
            None => true,
            Some(actor) => match actor.registered_condition(name) {
                None => true,
                Some(EventCondition::Callable(check)) => check(actor.as_ref()),
                Some(EventCondition::Predicate(predicate)) => {
                    actor.evaluate_predicate(&predicate)?
                }
            },
        };

        if !need_to_fire {
            debug!(event = name, "fire condition is false, skipping dispatch");
            return Ok(DispatchOutcome::Skipped);
        }

        data.set_time(FIRED_AT_KEY, Utc::now());
        data.set(NAME_STAMP_KEY, name);

        let subscribers = self.registry.resolve(name);
        let delivered = subscribers.len();
        let mut first_failure: Option<ReactorError> = None;

        for subscriber in subscribers {
            if let Err(err) = subscriber.perform_where_needed(&data).await {
                error!(
                    event = name,
                    subscriber = subscriber.subscriber_name(),
                    error = %err,
                    "subscriber failed"
                );
                first_failure.get_or_insert(ReactorError::Subscriber {
                    subscriber: subscriber.subscriber_name().to_string(),
                    reason: err.to_string(),
                });
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(DispatchOutcome::Fired { delivered }),
        }
    }

    fn guard_console(&self, data: &EventData) -> ReactorResult<()> {
        if self.config.production_console()
            && !self.config.console_bypass()
            && !data.get_bool(CONFIRMED_KEY)
        {
            return Err(ReactorError::ConsoleGuard {
                reason: CONSOLE_GUARD_MESSAGE.to_string(),
            });
        }
        Ok(())
    }
}
