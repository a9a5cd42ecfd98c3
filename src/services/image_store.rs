//! 图片存储服务 - 业务能力层
//!
//! 只负责"把题目引用的图片放到规范位置"这一能力：
//! - 源文件: `{root}/{year}/images/{file}`
//! - 目标目录: `{root}/{year}/new_images/`
//! - 合并目录: `{root}/images/`

use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError, ImageError};
use crate::parsing::images::{canonical_file_name, source_file_name};

const SOURCE_IMAGES_DIR: &str = "images";
const NEW_IMAGES_DIR: &str = "new_images";

/// 图片存储服务
pub struct ImageStore {
    root: PathBuf,
    exam: String,
    legacy_jpg_prefix: String,
}

impl ImageStore {
    /// `root` 是包含各年份子目录的试卷根目录，目录名（小写）作为考试名称
    pub fn new(root: impl Into<PathBuf>, legacy_jpg_prefix: impl Into<String>) -> Self {
        let root = root.into();
        let exam = root
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self {
            root,
            exam,
            legacy_jpg_prefix: legacy_jpg_prefix.into(),
        }
    }

    pub fn exam(&self) -> &str {
        &self.exam
    }

    pub fn new_images_dir(&self, year: u32) -> PathBuf {
        self.root.join(year.to_string()).join(NEW_IMAGES_DIR)
    }

    /// 已放置图片的完整路径
    pub fn placed_image_path(&self, year: u32, file_name: &str) -> PathBuf {
        self.new_images_dir(year).join(file_name)
    }

    /// 把 `\includegraphics{name}` 引用的图片放到 new_images 目录，返回规范文件名
    ///
    /// 目标目录中已有同一规范文件名的图片时直接复用，不再复制。
    pub fn relocate(&self, year: u32, question: u32, referenced_name: &str) -> AppResult<String> {
        let file_name = source_file_name(referenced_name, &self.legacy_jpg_prefix);
        let source = self
            .root
            .join(year.to_string())
            .join(SOURCE_IMAGES_DIR)
            .join(&file_name);

        let target_dir = self.new_images_dir(year);
        fs::create_dir_all(&target_dir)
            .map_err(|e| AppError::file_write_failed(target_dir.display().to_string(), e))?;

        let base_name = Path::new(&file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&file_name);
        let new_name = canonical_file_name(&self.exam, year, question, base_name)?;
        let target = target_dir.join(&new_name);

        if target.is_file() {
            debug!("图片已存在，直接复用: {}", new_name);
            return Ok(new_name);
        }

        let img = image::open(&source).map_err(|source_err| ImageError::ConvertFailed {
            path: source.display().to_string(),
            source: source_err,
        })?;
        img.save_with_format(&target, ImageFormat::Png)
            .map_err(|source_err| ImageError::ConvertFailed {
                path: target.display().to_string(),
                source: source_err,
            })?;

        debug!("图片已保存: {}", target.display());
        Ok(new_name)
    }

    /// 把每年的 new_images 目录合并到 `{root}/images/`
    pub fn merge_year_images(&self, year: u32) -> AppResult<usize> {
        let source = self.new_images_dir(year);
        if !source.is_dir() {
            return Ok(0);
        }
        let copied = merge_dir(&source, &self.root.join(SOURCE_IMAGES_DIR))?;
        info!("✓ {} 年图片已合并: {} 个文件", year, copied);
        Ok(copied)
    }
}

/// 递归复制目录内容，目标目录中的其他条目保持不变
pub fn merge_dir(source: &Path, target: &Path) -> AppResult<usize> {
    if !source.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: source.display().to_string(),
        }
        .into());
    }
    fs::create_dir_all(target)
        .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

    let mut copied = 0;
    let entries = fs::read_dir(source)
        .map_err(|e| AppError::file_read_failed(source.display().to_string(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| AppError::file_read_failed(source.display().to_string(), e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());

        if from.is_dir() {
            copied += merge_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .map_err(|e| AppError::file_write_failed(to.display().to_string(), e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::new(2, 2).save(path).unwrap();
    }

    fn store_with_root() -> (tempfile::TempDir, ImageStore) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("UNESP");
        fs::create_dir_all(&root).unwrap();
        let store = ImageStore::new(&root, "2025");
        (tmp, store)
    }

    #[test]
    fn test_exam_name_is_lowercased_dir() {
        let (_tmp, store) = store_with_root();
        assert_eq!(store.exam(), "unesp");
    }

    #[test]
    fn test_relocate_renames_and_reuses() {
        let (_tmp, store) = store_with_root();
        write_png(&store.root.join("2017/images/fig_a.png"));

        let name = store.relocate(2017, 12, "fig_a").unwrap();
        assert_eq!(name, "unesp_2017_12_fig_a.png");
        assert!(store.placed_image_path(2017, &name).exists());

        // 第二次调用直接复用已放置的文件
        fs::remove_file(store.root.join("2017/images/fig_a.png")).unwrap();
        assert_eq!(store.relocate(2017, 12, "fig_a").unwrap(), name);
    }

    #[test]
    fn test_reuse_requires_exact_canonical_name() {
        let (_tmp, store) = store_with_root();
        write_png(&store.root.join("2017/images/bigfig.png"));
        image::RgbImage::new(3, 3)
            .save(store.root.join("2017/images/fig.png"))
            .unwrap();

        let first = store.relocate(2017, 1, "bigfig").unwrap();
        let second = store.relocate(2017, 2, "fig").unwrap();
        assert_eq!(first, "unesp_2017_1_bigfig.png");
        assert_eq!(second, "unesp_2017_2_fig.png");

        let placed = image::open(store.placed_image_path(2017, &second)).unwrap();
        assert_eq!(placed.width(), 3);
        assert_eq!(fs::read_dir(store.new_images_dir(2017)).unwrap().count(), 2);
    }

    #[test]
    fn test_canonical_name_is_idempotent() {
        let (_tmp, store) = store_with_root();
        write_png(&store.placed_image_path(2016, "unesp_2016_3_mapa.png"));

        let name = store.relocate(2016, 3, "unesp_2016_3_mapa").unwrap();
        assert_eq!(name, "unesp_2016_3_mapa.png");
        assert_eq!(fs::read_dir(store.new_images_dir(2016)).unwrap().count(), 1);
    }

    #[test]
    fn test_legacy_jpg_is_converted_to_png() {
        let (_tmp, store) = store_with_root();
        let source = store.root.join("2025/images/2025_01_foto.jpg");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        image::RgbImage::new(2, 2)
            .save_with_format(&source, ImageFormat::Jpeg)
            .unwrap();

        let name = store.relocate(2025, 1, "2025_01_foto").unwrap();
        assert_eq!(name, "unesp_2025_1_2025_01_foto.png");
        let placed = image::open(store.placed_image_path(2025, &name)).unwrap();
        assert_eq!(placed.width(), 2);
    }

    #[test]
    fn test_missing_source_is_error() {
        let (_tmp, store) = store_with_root();
        assert!(matches!(
            store.relocate(2017, 1, "nao_existe"),
            Err(AppError::Image(ImageError::ConvertFailed { .. }))
        ));
    }

    #[test]
    fn test_merge_year_images_keeps_existing() {
        let (_tmp, store) = store_with_root();
        write_png(&store.placed_image_path(2014, "unesp_2014_1_a.png"));
        write_png(&store.root.join("images/antiga.png"));

        assert_eq!(store.merge_year_images(2014).unwrap(), 1);
        assert!(store.root.join("images/antiga.png").exists());
        assert!(store.root.join("images/unesp_2014_1_a.png").exists());
        assert_eq!(store.merge_year_images(2099).unwrap(), 0);
    }
}
