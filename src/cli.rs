//! 命令行入口
//!
//! 只负责解析参数并把工作交给编排层。

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::AppResult;
use crate::orchestrator::{App, RunSummary};

/// 把 LaTeX 试卷转换为 JSON 题目数据集
#[derive(Parser, Debug)]
#[command(name = "exam_latex_parser", version)]
pub struct Cli {
    /// 试卷根目录，每个年份一个子目录（包含 prova.tex 和 gabarito.tex）
    #[arg(long = "prova_dir")]
    pub prova_dir: PathBuf,
}

impl Cli {
    pub async fn run(self, config: Config) -> AppResult<RunSummary> {
        App::initialize(config, self.prova_dir).run().await
    }
}
