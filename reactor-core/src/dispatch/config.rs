//! 分发配置（DispatchConfig）
//!
//! 队列选择与生产控制台守卫的配置面。配置在构造分发器时显式注入，
//! 引擎只消费、从不修改这些输入。

use bon::Builder;

/// 队列覆盖的环境变量名
pub const QUEUE_ENV: &str = "REACTOR_QUEUE";
/// 控制台守卫旁路的环境变量名（设任意值即生效）
pub const CONSOLE_BYPASS_ENV: &str = "REACTOR_CONSOLE_ENABLED";
/// 事件类型自身的缺省队列
pub const DEFAULT_QUEUE: &str = "default";

/// 分发配置
#[derive(Debug, Clone, Default, Builder)]
pub struct DispatchConfig {
    /// 调用方是否处于生产控制台等交互式上下文（守卫的触发条件）
    #[builder(default)]
    production_console: bool,
    /// 环境级守卫旁路：配置后守卫不再拦截
    #[builder(default)]
    console_bypass: bool,
    /// 显式队列覆盖，优先级最高
    queue_override: Option<String>,
    /// 进程级缺省队列，次于显式覆盖
    default_queue: Option<String>,
}

impl DispatchConfig {
    /// 从环境读取队列覆盖与守卫旁路；是否处于生产控制台由调用方判定
    pub fn from_env() -> Self {
        Self::builder()
            .maybe_queue_override(std::env::var(QUEUE_ENV).ok().filter(|v| !v.is_empty()))
            .console_bypass(std::env::var(CONSOLE_BYPASS_ENV).is_ok())
            .build()
    }

    pub fn production_console(&self) -> bool {
        self.production_console
    }

    pub fn console_bypass(&self) -> bool {
        self.console_bypass
    }

    /// 队列选择：显式覆盖 > 进程级缺省 > 事件类型自身的缺省
    pub fn queue_for(&self, event_default: &str) -> String {
        self.queue_override
            .as_deref()
            .or(self.default_queue.as_deref())
            .unwrap_or(event_default)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_precedence_is_override_then_default_then_event() {
        let config = DispatchConfig::builder()
            .queue_override("override".to_string())
            .default_queue("configured".to_string())
            .build();
        assert_eq!(config.queue_for(DEFAULT_QUEUE), "override");

        let config = DispatchConfig::builder()
            .default_queue("configured".to_string())
            .build();
        assert_eq!(config.queue_for(DEFAULT_QUEUE), "configured");

        let config = DispatchConfig::default();
        assert_eq!(config.queue_for(DEFAULT_QUEUE), "default");
    }

    #[test]
    fn from_env_reads_override_and_bypass() {
        // 环境变量是进程级状态，设置与清理集中在这一个用例内
        unsafe {
            std::env::set_var(QUEUE_ENV, "urgent");
            std::env::set_var(CONSOLE_BYPASS_ENV, "1");
        }
        let configured = DispatchConfig::from_env();

        unsafe {
            std::env::set_var(QUEUE_ENV, "");
            std::env::remove_var(CONSOLE_BYPASS_ENV);
        }
        let blank_override = DispatchConfig::from_env();

        unsafe {
            std::env::remove_var(QUEUE_ENV);
        }
        let unset = DispatchConfig::from_env();

        assert_eq!(configured.queue_for(DEFAULT_QUEUE), "urgent");
        assert!(configured.console_bypass());
        assert!(!configured.production_console());

        // 空字符串的覆盖视同未配置
        assert_eq!(blank_override.queue_for(DEFAULT_QUEUE), "default");
        assert!(!blank_override.console_bypass());

        assert_eq!(unset.queue_for(DEFAULT_QUEUE), "default");
    }
}
