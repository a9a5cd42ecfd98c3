use crate::error::{AppError, AppResult, FileError};
use std::path::Path;
use tokio::fs;

pub const PROVA_FILE: &str = "prova.tex";
pub const GABARITO_FILE: &str = "gabarito.tex";

/// 一年试卷的 LaTeX 源文件内容
#[derive(Debug, Clone)]
pub struct ExamSources {
    pub year: u32,
    pub prova: String,
    pub gabarito: String,
}

/// 列出根目录下所有可处理的年份目录（按年份排序）
///
/// 目录名不是年份、或缺少 prova.tex / gabarito.tex 的目录会被跳过。
pub async fn list_exam_years(root: &Path) -> AppResult<Vec<u32>> {
    if !root.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let mut years = Vec::new();
    let mut entries = fs::read_dir(root)
        .await
        .map_err(|e| AppError::file_read_failed(root.display().to_string(), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(root.display().to_string(), e))?
    {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let Ok(year) = name.parse::<u32>() else {
            tracing::debug!("跳过非年份目录: {}", name);
            continue;
        };

        if path.join(PROVA_FILE).exists() && path.join(GABARITO_FILE).exists() {
            years.push(year);
        } else {
            tracing::warn!(
                "⚠️ {} 缺少 {} 或 {}，跳过",
                path.display(),
                PROVA_FILE,
                GABARITO_FILE
            );
        }
    }

    years.sort_unstable();
    Ok(years)
}

/// 读取某一年的 prova.tex 和 gabarito.tex
pub async fn load_exam_sources(root: &Path, year: u32) -> AppResult<ExamSources> {
    let year_dir = root.join(year.to_string());
    let prova = read_file(&year_dir.join(PROVA_FILE)).await?;
    let gabarito = read_file(&year_dir.join(GABARITO_FILE)).await?;

    tracing::info!(
        "正在加载 {} 年试卷: prova {} 字节, gabarito {} 字节",
        year,
        prova.len(),
        gabarito.len()
    );

    Ok(ExamSources {
        year,
        prova,
        gabarito,
    })
}

async fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}
