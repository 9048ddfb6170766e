//! Companion - 桌面伴侣的对话播放后端

use std::sync::Arc;
use std::time::Duration;

use companion::application::{PlaybackPort, TaskQueuePort};
use companion::config::{load_config, print_config, AppConfig, PlaybackBackend};
use companion::infrastructure::adapters::{ClockPlayback, FakePlayback, FakePlaybackConfig};
use companion::infrastructure::events::EventPublisher;
use companion::infrastructure::http::{AppState, HttpServer, ServerConfig};
use companion::infrastructure::memory::{
    InMemoryAiState, InMemoryChatHistory, SequentialTaskQueue, SequentialTaskQueueConfig,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},companion={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn create_playback(config: &AppConfig) -> Arc<dyn PlaybackPort> {
    match config.playback.backend {
        PlaybackBackend::Clock => Arc::new(ClockPlayback::new()),
        PlaybackBackend::Fake => Arc::new(FakePlayback::new(FakePlaybackConfig {
            duration: Duration::from_millis(config.playback.fake_duration_ms),
            fail: false,
        })),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Companion v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let task_queue = SequentialTaskQueue::new(SequentialTaskQueueConfig {
        task_interval: config.queue.task_interval(),
        task_timeout: config.queue.task_timeout(),
    })
    .arc();
    let playback = create_playback(&config);
    let chat_history = InMemoryChatHistory::new().arc();
    let ai_state = InMemoryAiState::new().arc();
    let event_publisher = EventPublisher::new().arc();

    let state = Arc::new(AppState::new(
        task_queue.clone(),
        playback,
        chat_history,
        ai_state,
        event_publisher,
    ));

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 丢弃未开始的播放任务
    let dropped = task_queue.clear_queue();
    tracing::info!(dropped = dropped, "Server shutdown complete");

    Ok(())
}
