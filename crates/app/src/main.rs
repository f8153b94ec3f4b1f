use clap::Parser;
use cli::{Cli, Commands};
use finboard_chart::{RandomPalette, TerminalRenderer};
use finboard_core::store::port::SettingsStore;
use finboard_gateway::http::HttpGateway;
use finboard_store::SqliteSettingsStore;
use finboard_views::AppContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod loader;
mod render;
mod shell;
mod traffic;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化网关、存储与渲染器，并通过 `AppContext` 注入到各视图。
///
/// # Logic
/// 1. 解析命令行并加载配置。
/// 2. 初始化全局日志。
/// 3. 打开设置存储，确定生效的 API 地址 (命令行 > 已保存 > 配置)。
/// 4. 组装 `AppContext` 并执行命令。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 命令行与配置
    let cli = Cli::parse();
    let config = loader::load_config(cli.config.as_deref())?;

    // 2. 日志
    init_tracing(&config.log.level);
    info!("finboard starting...");

    // 3. 基础设施层
    finboard_store::config::set_root_dir(PathBuf::from(&config.storage.data_dir));
    let store = Arc::new(SqliteSettingsStore::new(&config.api.base_url).await?);
    let base_url = match &cli.api_url {
        Some(url) => url.clone(),
        None => store.api_url().await?,
    };
    let gateway = Arc::new(HttpGateway::new(
        &base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);
    info!("Using API at {}", base_url);

    // 4. 视图上下文
    let ctx = AppContext::new(
        gateway,
        store.clone(),
        Arc::new(TerminalRenderer::new()),
        Arc::new(RandomPalette),
        config,
    );

    let result = match cli.command {
        Commands::Shell => shell::run(&ctx).await,
        command => commands::run(&ctx, command).await,
    };

    store.close().await;
    result
}

/// 日志级别优先取 `RUST_LOG`，否则使用配置中的 `log.level`。
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
