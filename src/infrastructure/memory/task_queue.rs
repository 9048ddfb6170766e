//! In-Memory Sequential Task Queue Implementation
//!
//! 单消费者模型：`pending` 和 `running` 由同一把锁保护，
//! 消费循环在 Tokio 任务中运行，队列排空后退出，下次入队时重新启动。

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

use crate::application::ports::{QueueStatus, QueueTask, TaskError, TaskQueuePort};

/// 默认任务间隔（毫秒）
pub const DEFAULT_TASK_INTERVAL_MS: u64 = 20;

/// 默认单任务超时（毫秒）
pub const DEFAULT_TASK_TIMEOUT_MS: u64 = 60_000;

/// 队列配置
#[derive(Debug, Clone)]
pub struct SequentialTaskQueueConfig {
    /// 上一个任务结束到下一个任务开始的最小间隔
    pub task_interval: Duration,
    /// 单个任务的超时时间，`None` 表示不限时
    pub task_timeout: Option<Duration>,
}

impl Default for SequentialTaskQueueConfig {
    fn default() -> Self {
        Self {
            task_interval: Duration::from_millis(DEFAULT_TASK_INTERVAL_MS),
            task_timeout: Some(Duration::from_millis(DEFAULT_TASK_TIMEOUT_MS)),
        }
    }
}

struct QueueState {
    pending: VecDeque<QueueTask>,
    /// 消费循环是否存活（执行任务或处于冷却期）
    running: bool,
    /// 已启动任务计数，仅用于日志
    started: u64,
}

struct Inner {
    config: SequentialTaskQueueConfig,
    state: Mutex<QueueState>,
    /// true 表示队列空闲
    idle_tx: watch::Sender<bool>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // 锁内没有可能 panic 的代码，中毒时直接取回数据
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 消费循环：取队首、执行、冷却，直到队列为空
    async fn drain(self: Arc<Self>) {
        loop {
            let (task, seq) = {
                let mut state = self.lock();
                match state.pending.pop_front() {
                    Some(task) => {
                        state.started += 1;
                        (task, state.started)
                    }
                    None => {
                        state.running = false;
                        self.idle_tx.send_replace(true);
                        tracing::debug!("Queue is empty");
                        return;
                    }
                }
            };

            tracing::debug!(task_seq = seq, "Task started");
            match self.run_task(task).await {
                Ok(()) => tracing::debug!(task_seq = seq, "Task completed"),
                Err(e) => tracing::warn!(task_seq = seq, error = %e, "Task failed"),
            }

            tokio::time::sleep(self.config.task_interval).await;
        }
    }

    /// 执行单个任务，失败、panic、超时都转换为 TaskError
    async fn run_task(&self, task: QueueTask) -> Result<(), TaskError> {
        let handle = tokio::spawn(task());
        let abort = handle.abort_handle();

        let joined = match self.config.task_timeout {
            Some(limit) => match tokio::time::timeout(limit, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    abort.abort();
                    return Err(TaskError::TimedOut(limit));
                }
            },
            None => handle.await,
        };

        joined.map_err(|e| TaskError::Panicked(e.to_string()))?
    }
}

/// 顺序任务队列
pub struct SequentialTaskQueue {
    inner: Arc<Inner>,
}

impl SequentialTaskQueue {
    pub fn new(config: SequentialTaskQueueConfig) -> Self {
        let (idle_tx, _) = watch::channel(true);
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    running: false,
                    started: 0,
                }),
                idle_tx,
            }),
        }
    }

    pub fn with_interval(task_interval: Duration) -> Self {
        Self::new(SequentialTaskQueueConfig {
            task_interval,
            ..Default::default()
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for SequentialTaskQueue {
    fn default() -> Self {
        Self::new(SequentialTaskQueueConfig::default())
    }
}

#[async_trait]
impl TaskQueuePort for SequentialTaskQueue {
    fn add_task(&self, task: QueueTask) {
        let start_drain = {
            let mut state = self.inner.lock();
            state.pending.push_back(task);
            tracing::debug!(pending = state.pending.len(), "Task added");

            if state.running {
                false
            } else {
                state.running = true;
                self.inner.idle_tx.send_replace(false);
                true
            }
        };

        if start_drain {
            tokio::spawn(self.inner.clone().drain());
        }
    }

    fn clear_queue(&self) -> usize {
        let dropped = {
            let mut state = self.inner.lock();
            let dropped = state.pending.len();
            state.pending.clear();
            dropped
        };

        tracing::info!(dropped = dropped, "Queue cleared");
        dropped
    }

    fn status(&self) -> QueueStatus {
        let state = self.inner.lock();
        QueueStatus {
            running: state.running,
            pending: state.pending.len(),
        }
    }

    async fn wait_for_completion(&self) {
        let mut idle_rx = self.inner.idle_tx.subscribe();
        // Sender 由 self 持有，这里不会因为通道关闭而返回错误
        let _ = idle_rx.wait_for(|idle| *idle).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::queue_task;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;
    use tokio::time::Instant;

    fn always() -> bool {
        true
    }

    fn queue(interval_ms: u64) -> SequentialTaskQueue {
        SequentialTaskQueue::with_interval(Duration::from_millis(interval_ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_order() {
        let queue = queue(10);
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            queue.add_task(queue_task(move || async move {
                order.lock().unwrap().push(i);
                tokio::time::sleep(Duration::from_millis(5 * (5 - i))).await;
                Ok(())
            }));
        }

        queue.wait_for_completion().await;
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_serialization_and_interval() {
        let queue = queue(100);
        let spans = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..4 {
            let spans = spans.clone();
            queue.add_task(queue_task(move || async move {
                let start = Instant::now();
                tokio::time::sleep(Duration::from_millis(30)).await;
                spans.lock().unwrap().push((start, Instant::now()));
                Ok(())
            }));
        }

        queue.wait_for_completion().await;

        let spans = spans.lock().unwrap();
        assert_eq!(spans.len(), 4);
        for pair in spans.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start >= prev_end);
            assert!(next_start - prev_end >= Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_added_during_cooldown_waits_full_interval() {
        let queue = Arc::new(queue(200));
        let finished_at = Arc::new(Mutex::new(None));
        let started_at = Arc::new(Mutex::new(None));

        let f = finished_at.clone();
        queue.add_task(queue_task(move || async move {
            *f.lock().unwrap() = Some(Instant::now());
            Ok(())
        }));

        // 第一个任务结束后、冷却期内再入队
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(queue.status().running);

        let s = started_at.clone();
        queue.add_task(queue_task(move || async move {
            *s.lock().unwrap() = Some(Instant::now());
            Ok(())
        }));

        queue.wait_for_completion().await;

        let finished = finished_at.lock().unwrap().unwrap();
        let started = started_at.lock().unwrap().unwrap();
        assert!(started - finished >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_isolation() {
        let queue = queue(10);
        let ran = Arc::new(AtomicUsize::new(0));

        queue.add_task(queue_task(|| async { Err(TaskError::failed("boom")) }));
        let r = ran.clone();
        queue.add_task(queue_task(move || async move {
            r.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        queue.wait_for_completion().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panic_isolation() {
        let queue = queue(10);
        let ran = Arc::new(AtomicUsize::new(0));

        queue.add_task(queue_task(|| async {
            if always() {
                panic!("task panicked");
            }
            Ok(())
        }));
        let r = ran.clone();
        queue.add_task(queue_task(move || async move {
            r.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        queue.wait_for_completion().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_unblocks_queue() {
        let queue = SequentialTaskQueue::new(SequentialTaskQueueConfig {
            task_interval: Duration::from_millis(10),
            task_timeout: Some(Duration::from_secs(1)),
        });
        let ran = Arc::new(AtomicUsize::new(0));

        queue.add_task(queue_task(|| async {
            std::future::pending::<()>().await;
            Ok(())
        }));
        let r = ran.clone();
        queue.add_task(queue_task(move || async move {
            r.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        let start = Instant::now();
        queue.wait_for_completion().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert!(Instant::now() - start >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_keeps_in_flight_task() {
        let queue = queue(10);
        let ran = Arc::new(AtomicUsize::new(0));
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let r = ran.clone();
        queue.add_task(queue_task(move || async move {
            let _ = started_tx.send(());
            let _ = release_rx.await;
            r.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        started_rx.await.unwrap();

        for _ in 0..3 {
            let r = ran.clone();
            queue.add_task(queue_task(move || async move {
                r.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }));
        }
        assert_eq!(queue.status().pending, 3);
        assert_eq!(queue.clear_queue(), 3);

        release_tx.send(()).unwrap();
        queue.wait_for_completion().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(queue.status(), QueueStatus { running: false, pending: 0 });
    }

    #[test]
    fn test_default_config_is_bounded() {
        let config = SequentialTaskQueueConfig::default();
        assert_eq!(config.task_interval, Duration::from_millis(20));
        assert_eq!(config.task_timeout, Some(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_queue_times_out_stuck_task() {
        let queue = SequentialTaskQueue::default();
        let ran = Arc::new(AtomicUsize::new(0));

        queue.add_task(queue_task(|| async {
            std::future::pending::<()>().await;
            Ok(())
        }));
        let r = ran.clone();
        queue.add_task(queue_task(move || async move {
            r.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        queue.wait_for_completion().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_on_idle_queue_returns_immediately() {
        let queue = SequentialTaskQueue::default();
        queue.wait_for_completion().await;
        assert!(!queue.status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_restarts_after_drained() {
        let queue = queue(10);
        let ran = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let r = ran.clone();
            queue.add_task(queue_task(move || async move {
                r.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }));
            queue.wait_for_completion().await;
        }

        assert_eq!(ran.load(Ordering::SeqCst), 2);
    }
}
