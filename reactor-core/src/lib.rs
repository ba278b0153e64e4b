//! 进程内事件发布与异步分发引擎（reactor-core）
//!
//! 生产者以事件名加数据载荷发布事件，引擎借助外部异步作业设施，
//! 立即或在未来的计划时刻，把事件有条件地扇出给零或多个已注册订阅者：
//! - 信封与属性包（`event`）：动态属性与实体引用的 `_type`/`_id` 编码
//! - 订阅注册表（`dispatch::SubscriberRegistry`）：具名列表加通配组
//! - 发布/执行编排（`dispatch::EventDispatcher`）：守卫、校验、入队与
//!   执行期的触发条件求值
//! - 重调度/取消协议（`dispatch` 下的 `Fingerprint`）：按指纹定位并替换
//!   此前计划的同一逻辑事件
//! - 协作方协议（`scheduler`、`entity`）：作业调度器与实体仓储的接口边界
//!
//! 本 crate 不实现持久化存储与分布式一致性，只假设外部作业系统提供
//! 至少一次的异步执行与可检视的待执行作业状态。
//!
//! 典型用法：
//! 1. 启动注册阶段向 `SubscriberRegistry` 登记订阅者，随后以 `Arc` 冻结；
//! 2. 注入调度器、实体仓储、校验策略与配置，构造 `EventDispatcher`；
//! 3. 生产侧调用 `publish`，工作进程在作业执行时回调 `perform`；
//! 4. 需要改期或取消时调用 `reschedule`。
//!
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod event;
pub mod scheduler;

pub use dispatch::{
    DispatchConfig, DispatchOutcome, EventDispatcher, Fingerprint, Subscriber,
    SubscriberRegistry, Validator,
};
pub use entity::{Entity, EntityStore, EventCondition};
pub use error::{ReactorError, ReactorResult};
pub use event::{EntityRef, Event, EventData};
pub use scheduler::{InMemoryScheduler, JobScheduler, ScheduledJob};
