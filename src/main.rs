use branch_order_analyzer::config::StoreBackend;
use branch_order_analyzer::{api, AppConfig, AppState, DocumentStore, MemoryDocumentStore, PgDocumentStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 按配置打开文档存储
    match config.store.backend {
        StoreBackend::Postgres => {
            let store = PgDocumentStore::connect(&config.database).await?;
            info!("Database pool created");
            serve(store, &config).await
        }
        StoreBackend::Memory => {
            warn!("Using in-memory document store, data will be lost on shutdown");
            serve(MemoryDocumentStore::new(), &config).await
        }
    }
}

async fn serve<S: DocumentStore>(
    store: S,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(store);
    let state = AppState::new(store.clone(), config.aggregation.fetch_concurrency);
    let app = api::router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/branches");
    info!("  GET  /api/orders/date/{{yyyy-mm-dd}}");
    info!("  GET  /api/orders?startDate=yyyy-mm-dd&endDate=yyyy-mm-dd");
    info!("  POST /api/orders?date=yyyy-mm-dd");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // 无论服务如何退出都释放存储
    store.close().await;
    served?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
