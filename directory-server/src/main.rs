use directory_server::{Config, Server, ServerState, init_logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 1. 加载 .env
    let _ = dotenv::dotenv();

    // 2. 加载配置
    let config = Config::from_env()?;

    // 3. 初始化日志
    init_logger(&config.log_level, config.log_dir.as_deref())?;

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Employee directory starting..."
    );

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::new(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
