//! 日志初始化
//!
//! `RUST_LOG` 优先；否则默认 `course_builder=info`，详细模式为 `debug`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志（重复调用时忽略）
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "course_builder=debug"
    } else {
        "course_builder=info"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_target(false))
        .try_init();
}
