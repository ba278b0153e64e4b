//! 事件属性包（EventData）
//!
//! 字符串键到标量/时间戳/实体引用的映射，是信封与线格式共享的数据形态：
//! - 实体引用不以活对象存储，而编码为并存的 `<key>_type` / `<key>_id` 两项；
//! - 读取实体引用时每次都经由实体仓储重新解析，不做缓存（以新鲜度换读取成本）；
//! - 文本值在写入时清洗无法解码的字节序列，单个坏值不使整体构造失败。

use crate::entity::{Entity, EntityStore};
use crate::error::{ReactorError, ReactorResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const TYPE_SUFFIX: &str = "_type";
const ID_SUFFIX: &str = "_id";

/// 从原始字节构造文本属性值：按 UTF-8 宽容解码，替换符一律丢弃
pub fn text_from_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// 实体引用：以类型标识与实体 ID 指代一个实体，不持有实体本身
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    entity_type: String,
    entity_id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

/// 事件属性包：字符串键的扁平映射
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventData {
    inner: Map<String, Value>,
}

impl EventData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从线格式载荷还原属性包；非对象输入视为畸形事件
    pub fn from_value(value: Value) -> ReactorResult<Self> {
        match value {
            Value::Object(inner) => Ok(Self { inner }),
            other => Err(ReactorError::MalformedEvent {
                reason: format!("payload must be an object, got {other}"),
            }),
        }
    }

    /// 写入标量属性；文本值会剔除无法解码的替换符
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = match value.into() {
            Value::String(s) if s.contains(char::REPLACEMENT_CHARACTER) => {
                Value::String(s.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect())
            }
            other => other,
        };
        self.inner.insert(key.into(), value);
    }

    /// 写入实体引用：同时落下 `<key>_type` 与 `<key>_id` 两项
    pub fn set_entity(&mut self, key: &str, entity: &EntityRef) {
        self.inner.insert(
            format!("{key}{TYPE_SUFFIX}"),
            Value::String(entity.entity_type.clone()),
        );
        self.inner.insert(
            format!("{key}{ID_SUFFIX}"),
            Value::String(entity.entity_id.clone()),
        );
    }

    /// 以 RFC 3339 文本写入时间戳属性
    pub fn set_time(&mut self, key: impl Into<String>, at: DateTime<Utc>) {
        self.inner.insert(key.into(), Value::String(at.to_rfc3339()));
    }

    /// 移除属性；若该键承载实体引用，则 `_type`/`_id` 两项一并清除
    pub fn remove(&mut self, key: &str) {
        self.inner.remove(key);
        self.inner.remove(&format!("{key}{TYPE_SUFFIX}"));
        self.inner.remove(&format!("{key}{ID_SUFFIX}"));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// 读取布尔属性，缺失或非布尔值均视为 false
    pub fn get_bool(&self, key: &str) -> bool {
        self.inner.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// 读取时间戳属性；存在但无法解析时报解析错误
    pub fn get_time(&self, key: &str) -> ReactorResult<Option<DateTime<Utc>>> {
        match self.inner.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let parsed = DateTime::parse_from_rfc3339(s)?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            Some(other) => Err(ReactorError::Parse {
                reason: format!("attribute `{key}` is not a timestamp: {other}"),
            }),
        }
    }

    /// 读取实体引用；仅当 `_type` 与 `_id` 两项同时存在时成立
    pub fn entity_ref(&self, key: &str) -> Option<EntityRef> {
        let entity_type = self.inner.get(&format!("{key}{TYPE_SUFFIX}"))?.as_str()?;
        let entity_id = self.inner.get(&format!("{key}{ID_SUFFIX}"))?.as_str()?;
        Some(EntityRef::new(entity_type, entity_id))
    }

    /// 经由实体仓储解析引用指向的实体；每次调用都重新查找，不做缓存
    pub async fn resolve_entity(
        &self,
        key: &str,
        store: &dyn EntityStore,
    ) -> ReactorResult<Option<Arc<dyn Entity>>> {
        match self.entity_ref(key) {
            None => Ok(None),
            Some(entity) => {
                let found = store
                    .find_unscoped(entity.entity_type(), entity.entity_id())
                    .await?;
                Ok(Some(found))
            }
        }
    }

    /// 并入另一属性包，键冲突时以 `other` 为准
    pub fn merge(&mut self, other: EventData) {
        for (key, value) in other.inner {
            self.inner.insert(key, value);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.inner.clone())
    }
}

impl From<Map<String, Value>> for EventData {
    fn from(inner: Map<String, Value>) -> Self {
        Self { inner }
    }
}

// 从键值对序列构造：逐项经过 `set`，文本值按同样的规则清洗
impl FromIterator<(String, Value)> for EventData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.set(key, value);
        }
        data
    }
}
