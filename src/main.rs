use anyhow::Result;
use clap::Parser;
use course_builder::{logger, App, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.load_config()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config, cli)?.run().await
}
