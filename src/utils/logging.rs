/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `prova_dir`: 试卷根目录
/// - `expected_questions`: 每年应有的题目数量
pub fn log_startup(prova_dir: &str, expected_questions: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 试卷目录: {}", prova_dir);
    info!("📊 每年题目数: {}", expected_questions);
    info!("{}", "=".repeat(60));
}

/// 记录年份加载信息
pub fn log_years_found(years: &[u32]) {
    info!("✓ 找到 {} 个待处理的年份: {:?}", years.len(), years);
}

/// 记录某一年开始处理
pub fn log_year_start(year: u32) {
    info!("\n{}", "─".repeat(60));
    info!("📄 开始处理 {} 年试卷", year);
    info!("{}", "─".repeat(60));
}

/// 记录某一年处理完成
///
/// # 参数
/// - `year`: 年份
/// - `questions`: 写入的题目数量
/// - `classified`: 经过 LLM 科目分类的题目数量
/// - `with_images`: 题干带图片的题目数量
/// - `trailing_text_warnings`: (E) 选项之后仍有文字的题目数量
pub fn log_year_complete(
    year: u32,
    questions: usize,
    classified: usize,
    with_images: usize,
    trailing_text_warnings: usize,
) {
    info!(
        "✓ {} 年完成: {} 道题（其中 {} 道经 LLM 分类科目，{} 道题干带图片）",
        year, questions, classified, with_images
    );
    if trailing_text_warnings > 0 {
        warn!(
            "⚠️ {} 年有 {} 道题在 (E) 选项之后仍有文字，请人工检查",
            year, trailing_text_warnings
        );
    }
}

/// 打印最终统计信息
pub fn print_final_stats(years: usize, questions: usize, output: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 年份: {}", years);
    info!("✅ 题目: {}", questions);
    info!("{}", "=".repeat(60));
    info!("\n数据集已保存至: {}", output);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("questão", 10), "questão");
        assert_eq!(truncate_text("questão", 5), "quest...");
    }
}
