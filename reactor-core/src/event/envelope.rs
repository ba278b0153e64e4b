//! 事件信封（Event）
//!
//! 一次事件发生的结构化载荷：事件名、发布时生成的唯一标识与属性包。
//! 序列化产物是独立克隆，信封在入队后的任何修改都不会影响已提交的载荷。

use super::data::EventData;
use crate::error::{ReactorError, ReactorResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// 载荷中承载事件名的保留键
pub const NAME_KEY: &str = "event";
/// 载荷中承载信封唯一标识的保留键
pub const ID_KEY: &str = "uuid";
/// 可选的未来执行时间属性
pub const SCHEDULED_AT_KEY: &str = "at";

/// 事件信封
#[derive(Debug, Clone)]
pub struct Event {
    name: String,
    id: String,
    data: EventData,
}

impl Event {
    /// 构造信封：事件名不可为空，标识在此刻生成
    pub fn new(name: impl Into<String>, data: EventData) -> ReactorResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ReactorError::MalformedEvent {
                reason: "event name must not be empty".to_string(),
            });
        }

        Ok(Self {
            name,
            id: Uuid::new_v4().to_string(),
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EventData {
        &mut self.data
    }

    /// 读取可选的计划执行时间（`at` 属性）
    pub fn scheduled_at(&self) -> ReactorResult<Option<DateTime<Utc>>> {
        self.data.get_time(SCHEDULED_AT_KEY)
    }

    /// 序列化为线格式载荷：属性包的克隆加上 `event`/`uuid` 两个保留键。
    /// 实体引用保持 `_type`/`_id` 编码，序列化时从不自动解析。
    pub fn to_payload(&self) -> Value {
        let mut data = self.data.clone();
        data.set(NAME_KEY, self.name.clone());
        data.set(ID_KEY, self.id.clone());
        data.to_value()
    }
}
