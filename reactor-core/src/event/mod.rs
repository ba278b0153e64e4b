//! 事件模型（Event）
//!
//! 定义事件发生一次所携带的数据形态：
//! - `EventData`：字符串键的属性包，支持实体引用的 `_type`/`_id` 编码；
//! - `EntityRef`：实体引用的值形态（类型 + 标识）；
//! - `Event`：事件信封，在发布时生成唯一标识并负责序列化。

mod data;
mod envelope;

pub use data::{EntityRef, EventData, text_from_bytes};
pub use envelope::{Event, ID_KEY, NAME_KEY, SCHEDULED_AT_KEY};
