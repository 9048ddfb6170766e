//! Task Queue Port - 顺序播放任务队列
//!
//! 定义顺序任务队列的抽象接口，具体实现在 infrastructure/memory 层

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

/// 任务执行错误
///
/// 任务失败只会被记录，不会传播给入队方，也不会阻塞后续任务
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task failed: {0}")]
    Failed(String),

    #[error("Task timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Task panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 队列任务：无参数的异步闭包，完成（包括失败）时返回
pub type QueueTask = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), TaskError>> + Send>;

/// 把普通异步闭包包装成 [`QueueTask`]
pub fn queue_task<F, Fut>(f: F) -> QueueTask
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<(), TaskError>> + Send + 'static,
{
    Box::new(move || Box::pin(f()) as BoxFuture<'static, Result<(), TaskError>>)
}

/// 队列状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct QueueStatus {
    /// 是否有任务正在执行（包括任务间隔冷却期）
    pub running: bool,
    /// 等待中的任务数
    pub pending: usize,
}

/// Task Queue Port
///
/// 保证：
/// - 任意时刻至多一个任务在执行
/// - 严格按入队顺序执行
/// - 上一个任务结束到下一个任务开始之间至少间隔 `task_interval`
#[async_trait]
pub trait TaskQueuePort: Send + Sync {
    /// 追加任务到队尾，必要时启动消费
    fn add_task(&self, task: QueueTask);

    /// 丢弃所有尚未开始的任务，返回丢弃数量；不影响正在执行的任务
    fn clear_queue(&self) -> usize;

    /// 获取队列状态
    fn status(&self) -> QueueStatus;

    /// 等待队列空闲（无执行中任务、无等待任务、冷却结束）
    async fn wait_for_completion(&self);
}
