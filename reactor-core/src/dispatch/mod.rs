//! 分发子系统（dispatch）
//!
//! 提供事件发布与扇出执行的基础抽象与编排：
//! - `SubscriberRegistry`：事件名到订阅者列表的注册表，含通配组；
//! - `Subscriber`：订阅者能力协议（自行决定是否与如何响应）；
//! - `Validator`：发布前的全局校验策略，默认放行；
//! - `DispatchConfig`：队列选择与生产控制台守卫的配置面；
//! - `EventDispatcher`：编排守卫、校验、序列化、入队与执行期的条件扇出，
//!   以及重调度/取消协议。

mod config;
mod dispatcher;
mod registry;
mod reschedule;
mod subscriber;
mod validator;

pub use config::DispatchConfig;
pub use dispatcher::{DISPATCHER_IDENTITY, DispatchOutcome, EventDispatcher};
pub use registry::{SubscriberRegistry, WILDCARD};
pub use reschedule::Fingerprint;
pub use subscriber::Subscriber;
pub use validator::{Validator, permissive};
