use anyhow::{Context, Result};
use clap::Parser;
use exam_latex_parser::cli::Cli;
use exam_latex_parser::utils::logging;
use exam_latex_parser::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();

    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    if let Err(e) = cli.run(config).await {
        tracing::error!("处理失败: {}", e);
        return Err(e.into());
    }

    Ok(())
}
