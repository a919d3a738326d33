use courier_http::{ConfigError, LogFormat, RuntimeConfigBuilder, ToolRuntime, shutdown_signal};
use courier_tools::{ExecutorError, RequestExecutor, standard_registry};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = RuntimeConfigBuilder::from_env()?.build()?;
    init_tracing(config.log_format);

    let executor = RequestExecutor::with_config(config.executor_config())?;
    let registry = standard_registry(executor);
    let tools = registry.tool_names();
    let app = ToolRuntime::new(registry).router_with_config(&config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        tools = ?tools,
        cors = config.enable_cors,
        max_body_size = config.max_body_size,
        "Courier server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Courier server stopped");
    Ok(())
}
