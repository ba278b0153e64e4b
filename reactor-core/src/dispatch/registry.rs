//! 订阅注册表（SubscriberRegistry）
//!
//! 事件名到订阅者有序列表的进程级映射，另含作用于全部事件的通配组。
//! 注册只发生在进程启动的注册阶段；进入服务阶段后注册表以 `Arc` 共享，
//! 天然只读，读取无需同步。

use super::subscriber::Subscriber;
use std::collections::HashMap;
use std::sync::Arc;

/// 通配组的注册键：该组订阅者参与所有事件的分发
pub const WILDCARD: &str = "*";

/// 订阅注册表
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    by_name: HashMap<String, Vec<Arc<dyn Subscriber>>>,
    wildcard: Vec<Arc<dyn Subscriber>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加注册；同一订阅者允许重复注册（无唯一性约束），
    /// 重复注册或同时注册于自身事件与通配组时会被多次调用
    pub fn register(&mut self, event_name: &str, subscriber: Arc<dyn Subscriber>) {
        if event_name == WILDCARD {
            self.wildcard.push(subscriber);
        } else {
            self.by_name
                .entry(event_name.to_string())
                .or_default()
                .push(subscriber);
        }
    }

    /// 解析事件的订阅者：具名列表在前、通配组在后，各组内保持注册顺序
    pub fn resolve(&self, event_name: &str) -> Vec<Arc<dyn Subscriber>> {
        let mut merged: Vec<Arc<dyn Subscriber>> = Vec::new();
        if let Some(list) = self.by_name.get(event_name) {
            merged.extend(list.iter().cloned());
        }
        merged.extend(self.wildcard.iter().cloned());
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventData;
    use async_trait::async_trait;

    struct Named(&'static str);

    #[async_trait]
    impl Subscriber for Named {
        fn subscriber_name(&self) -> &str {
            self.0
        }
        async fn perform_where_needed(&self, _data: &EventData) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn names(list: &[Arc<dyn Subscriber>]) -> Vec<&str> {
        list.iter().map(|s| s.subscriber_name()).collect()
    }

    #[test]
    fn resolve_returns_named_then_wildcard_in_registration_order() {
        let mut registry = SubscriberRegistry::new();
        registry.register("user.signup", Arc::new(Named("a")));
        registry.register("user.signup", Arc::new(Named("b")));
        registry.register(WILDCARD, Arc::new(Named("c")));

        assert_eq!(names(&registry.resolve("user.signup")), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_event_resolves_to_wildcard_only() {
        let mut registry = SubscriberRegistry::new();
        registry.register(WILDCARD, Arc::new(Named("c")));

        assert_eq!(names(&registry.resolve("nobody.cares")), vec!["c"]);
        assert!(SubscriberRegistry::new().resolve("nobody.cares").is_empty());
    }

    #[test]
    fn duplicate_registration_is_preserved() {
        let mut registry = SubscriberRegistry::new();
        let twice = Arc::new(Named("twice"));
        registry.register("ping", twice.clone());
        registry.register("ping", twice);

        assert_eq!(names(&registry.resolve("ping")), vec!["twice", "twice"]);
    }
}
