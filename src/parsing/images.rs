//! 图片引用定位
//!
//! 只做文本层面的工作：找到 `\includegraphics`、取出文件名、计算规范文件名。
//! 实际的文件复制由 `services::image_store` 完成。

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ImageError;

/// 完整的图片引用（可跨行）
pub static IMAGE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\includegraphics.*?\{.*?\}").unwrap());

static IMAGE_ARGUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\includegraphics.*?\{(.*?)\}").unwrap());

/// 返回文本中第一个图片引用
pub fn find_image_reference(text: &str) -> Option<&str> {
    IMAGE_REFERENCE.find(text).map(|m| m.as_str())
}

/// 图片引用中的路径参数（不含扩展名）
pub fn referenced_name(reference: &str) -> Option<&str> {
    IMAGE_ARGUMENT
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 推导源文件名：以 `legacy_prefix` 开头的图片是 .jpg，其余是 .png
pub fn source_file_name(name: &str, legacy_prefix: &str) -> String {
    if !legacy_prefix.is_empty() && name.starts_with(legacy_prefix) {
        format!("{}.jpg", name)
    } else {
        format!("{}.png", name)
    }
}

/// 计算图片在 new_images 目录中的规范文件名（总是 .png）
///
/// 已经带有 `{exam}_{year}_` 前缀的 .png 保持原名。
pub fn canonical_file_name(
    exam: &str,
    year: u32,
    question: u32,
    file_name: &str,
) -> Result<String, ImageError> {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let canonical = format!("{}_{}_{}_{}.png", exam, year, question, stem);

    match extension.as_deref() {
        Some("jpg") => Ok(canonical),
        Some("png") if stem.starts_with(&format!("{}_{}_", exam, year)) => {
            Ok(format!("{}.png", stem))
        }
        Some("png") => Ok(canonical),
        _ => Err(ImageError::UnsupportedFormat {
            path: file_name.to_string(),
        }),
    }
}
