//! tracing 订阅者与指标初始化

use crate::config::AppConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志订阅者，进程内只调用一次
/// RUST_LOG 存在时优先于配置中的日志级别
pub fn init_telemetry(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    // 配置校验保证 format 只会是 json 或 pretty
    if config.logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().pretty().with_target(false))
            .init();
    }

    tracing::info!(
        level = %config.logging.level,
        format = %config.logging.format,
        "Telemetry ready"
    );
}

/// 指标收集准备
/// metrics 宏在首次记录时自动注册，这里不需要逐个声明
pub fn init_metrics() {
    tracing::debug!("Metrics recorder ready");
}
