//! 猫体重追踪服务主入口

use cat_weight_tracker::{
    auth::jwt::JwtService,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    repository::UserRepository,
    routes,
    services::AuthService,
    telemetry,
};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("cat-weight-tracker {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // .env 只服务开发环境，生产环境直接注入环境变量
    if let Ok(profile) = std::env::var("CWT_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cat weight tracker starting..."
    );

    // 密钥未固定时令牌不跨重启存活；只记录这一事实，不记录密钥
    if config.security.jwt_secret_is_ephemeral {
        tracing::warn!(
            "JWT secret not configured; using an ephemeral secret, \
             issued tokens will not survive a restart"
        );
    }

    let db_pool = db::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    db::migrate(&db_pool)
        .await
        .context("failed to run database migrations")?;

    let jwt_service = Arc::new(JwtService::from_config(&config)?);
    let auth_service = Arc::new(AuthService::new(
        UserRepository::new(db_pool.clone()),
        jwt_service,
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        auth_service,
    });

    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// 等待 SIGINT/SIGTERM；收到后停止接收新请求，并启动强制退出看门狗
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        },
    }

    // 在途请求超时后强制退出
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("cat-weight-tracker {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: cat-weight-tracker [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 CWT_ 前缀的环境变量完成");
    println!("  例如 CWT_DATABASE__URL、CWT_SECURITY__JWT_SECRET");
}
