//! 内存版作业调度器（InMemoryScheduler）
//!
//! 基于 `Mutex<Vec<_>>` 的轻量实现，满足 `JobScheduler` 协议：
//! - `submit_immediate` / `submit_at`：分别落入立即队列与延迟集合；
//! - `list_scheduled_at`：按精确时间点（含亚秒）筛选延迟集合；
//! - `delete_scheduled`：按作业标识删除，重复删除为无操作；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：作业的实际执行由调用方驱动（`drain_immediate` / `take_due`），
//! 本实现不自带工作线程。

use super::{JobScheduler, ScheduledJob};
use crate::error::ReactorResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// 简单的内存调度器实现
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    immediate: Mutex<Vec<ScheduledJob>>,
    deferred: Mutex<Vec<ScheduledJob>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走全部立即作业，由调用方执行
    pub fn drain_immediate(&self) -> Vec<ScheduledJob> {
        std::mem::take(&mut *self.immediate.lock().unwrap())
    }

    /// 取走计划时间不晚于 `now` 的延迟作业，由调用方执行
    pub fn take_due(&self, now: DateTime<Utc>) -> Vec<ScheduledJob> {
        let mut deferred = self.deferred.lock().unwrap();
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut *deferred)
            .into_iter()
            .partition(|job| job.scheduled_at().is_some_and(|at| at <= now));
        *deferred = pending;
        due
    }

    /// 当前立即作业数（测试观测用）
    pub fn immediate_len(&self) -> usize {
        self.immediate.lock().unwrap().len()
    }

    /// 当前延迟作业数（测试观测用）
    pub fn deferred_len(&self) -> usize {
        self.deferred.lock().unwrap().len()
    }

    /// 延迟集合的快照（测试观测用）
    pub fn deferred_jobs(&self) -> Vec<ScheduledJob> {
        self.deferred.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobScheduler for InMemoryScheduler {
    async fn submit_immediate(&self, job: ScheduledJob) -> ReactorResult<()> {
        self.immediate.lock().unwrap().push(job);
        Ok(())
    }

    async fn submit_at(&self, _at: DateTime<Utc>, job: ScheduledJob) -> ReactorResult<()> {
        self.deferred.lock().unwrap().push(job);
        Ok(())
    }

    async fn list_scheduled_at(&self, at: DateTime<Utc>) -> ReactorResult<Vec<ScheduledJob>> {
        let jobs = self
            .deferred
            .lock()
            .unwrap()
            .iter()
            .filter(|job| job.scheduled_at() == Some(at))
            .cloned()
            .collect();
        Ok(jobs)
    }

    async fn delete_scheduled(&self, job: &ScheduledJob) -> ReactorResult<()> {
        self.deferred
            .lock()
            .unwrap()
            .retain(|pending| pending.job_id() != job.job_id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn mk_job(name: &str, at: Option<DateTime<Utc>>) -> ScheduledJob {
        ScheduledJob::builder()
            .dispatcher("reactor.event".to_string())
            .queue("default".to_string())
            .event_name(name.to_string())
            .payload(json!({}))
            .maybe_scheduled_at(at)
            .build()
    }

    #[tokio::test]
    async fn list_matches_the_exact_instant_including_subseconds() {
        let scheduler = InMemoryScheduler::new();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        scheduler.submit_at(at, mk_job("reminder", Some(at))).await.unwrap();

        assert_eq!(scheduler.list_scheduled_at(at).await.unwrap().len(), 1);

        // 相差一毫秒即视为无匹配
        let near_miss = at + chrono::Duration::milliseconds(1);
        assert!(scheduler.list_scheduled_at(near_miss).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let scheduler = InMemoryScheduler::new();
        let at = Utc::now();
        let job = mk_job("reminder", Some(at));
        scheduler.submit_at(at, job.clone()).await.unwrap();

        scheduler.delete_scheduled(&job).await.unwrap();
        assert_eq!(scheduler.deferred_len(), 0);

        // 再次删除同一作业不报错
        scheduler.delete_scheduled(&job).await.unwrap();
    }

    #[tokio::test]
    async fn take_due_splits_by_deadline() {
        let scheduler = InMemoryScheduler::new();
        let now = Utc::now();
        let soon = now + chrono::Duration::hours(1);
        scheduler.submit_at(now, mk_job("a", Some(now))).await.unwrap();
        scheduler.submit_at(soon, mk_job("b", Some(soon))).await.unwrap();

        let due = scheduler.take_due(now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event_name(), "a");
        assert_eq!(scheduler.deferred_len(), 1);
    }
}
