//! 数据集写入服务 - 业务能力层
//!
//! 只负责"写 JSON"能力：每年的 prova.json 和合并后的 data.json

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuestionRecord;

pub const YEAR_FILE: &str = "prova.json";
pub const MERGED_FILE: &str = "data.json";

/// 数据集写入服务
pub struct DatasetWriter {
    root: PathBuf,
}

impl DatasetWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn year_file(&self, year: u32) -> PathBuf {
        self.root.join(year.to_string()).join(YEAR_FILE)
    }

    /// 写入某一年的题目（4 空格缩进）
    pub fn write_year(&self, year: u32, records: &[QuestionRecord]) -> AppResult<PathBuf> {
        let path = self.year_file(year);
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut serializer)
            .map_err(|source| json_error(&path, source))?;

        fs::write(&path, buf).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        debug!("已写入 {} 道题: {}", records.len(), path.display());
        Ok(path)
    }

    /// 读取某一年已写入的题目
    pub fn read_year(&self, year: u32) -> AppResult<Vec<QuestionRecord>> {
        let path = self.year_file(year);
        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        serde_json::from_str(&content).map_err(|source| json_error(&path, source))
    }

    /// 按年份顺序拼接所有 prova.json，写入 data.json
    pub fn merge(&self, years: &[u32]) -> AppResult<usize> {
        let mut merged = Vec::new();
        for year in years {
            merged.extend(self.read_year(*year)?);
        }

        let path = self.root.join(MERGED_FILE);
        let content = serde_json::to_vec(&merged).map_err(|source| json_error(&path, source))?;
        fs::write(&path, content)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("✓ 数据集已合并: {} 道题 -> {}", merged.len(), path.display());
        Ok(merged.len())
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> AppError {
    FileError::JsonFailed {
        path: path.display().to_string(),
        source,
    }
    .into()
}
