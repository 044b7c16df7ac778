//! 外部OCRコマンド連携モジュール
//!
//! OCR自体は外部コマンド（tesseract / easyocr）に任せ、
//! 標準出力のテキストをそのまま RawText として受け取る。

pub mod cache;
mod engine;

pub use cache::{compute_file_hash, CacheEntry, CacheFile};
pub use engine::OcrEngine;

use crate::error::{ParcelAddressError, Result};
use crate::scanner::ImageInfo;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// OCR実行設定
#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub engine: OcrEngine,
    pub lang: String,
    pub timeout_seconds: u64,
}

/// 画像1枚分のOCR結果
#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub image: ImageInfo,
    pub text: String,
    /// キャッシュから取得したか
    pub cached: bool,
}

/// 画像1枚を認識する
pub async fn recognize_image(image: &Path, settings: &OcrSettings) -> Result<String> {
    let command = settings.engine.command_name();
    let args = settings.engine.args(image, &settings.lang);
    tracing::debug!("running {} {}", command, args.join(" "));

    let mut cmd = Command::new(command);
    cmd.args(&args).kill_on_drop(true);

    let output = tokio::time::timeout(Duration::from_secs(settings.timeout_seconds), cmd.output())
        .await
        .map_err(|_| ParcelAddressError::OcrTimeout {
            file: image.display().to_string(),
            seconds: settings.timeout_seconds,
        })?
        .map_err(|e| ParcelAddressError::OcrExecution(format!("{}: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ParcelAddressError::OcrExecution(format!(
            "{} failed (code {:?}): {}",
            command,
            output.status.code(),
            stderr.trim()
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();
    tracing::debug!("{}: {} chars recognized", image.display(), text.chars().count());
    Ok(text)
}

/// 画像をまとめて認識する
///
/// - キャッシュがあればヒットした画像は再認識しない
/// - 1枚の失敗で全体は止めない（警告を出して空テキスト扱い）
pub async fn recognize_images(
    images: &[ImageInfo],
    settings: &OcrSettings,
    mut cache: Option<&mut CacheFile>,
) -> Vec<OcrOutput> {
    let progress = ProgressBar::new(images.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let engine_name = settings.engine.command_name();
    let mut outputs = Vec::with_capacity(images.len());

    for image in images {
        progress.set_message(image.file_name.clone());

        let hash = match cache.as_ref() {
            Some(_) => match compute_file_hash(&image.path) {
                Ok(h) => Some(h),
                Err(e) => {
                    // ハッシュ計算失敗時は未キャッシュとして扱う
                    tracing::warn!("hash failed for {}: {}", image.file_name, e);
                    None
                }
            },
            None => None,
        };

        let cached_text = match (cache.as_deref(), hash.as_deref()) {
            (Some(c), Some(h)) => c.get(h, engine_name).map(str::to_string),
            _ => None,
        };

        if let Some(text) = cached_text {
            tracing::debug!("cache hit: {}", image.file_name);
            outputs.push(OcrOutput {
                image: image.clone(),
                text,
                cached: true,
            });
            progress.inc(1);
            continue;
        }

        let text = match recognize_image(&image.path, settings).await {
            Ok(text) => {
                if let (Some(c), Some(h)) = (cache.as_deref_mut(), hash) {
                    let file_size = std::fs::metadata(&image.path).map(|m| m.len()).unwrap_or(0);
                    c.insert(
                        h,
                        CacheEntry {
                            file_name: image.file_name.clone(),
                            file_size,
                            engine: engine_name.to_string(),
                            text: text.clone(),
                        },
                    );
                }
                text
            }
            Err(e) => {
                tracing::warn!("OCR failed for {}: {}", image.file_name, e);
                String::new()
            }
        };

        outputs.push(OcrOutput {
            image: image.clone(),
            text,
            cached: false,
        });
        progress.inc(1);
    }

    progress.finish_and_clear();
    outputs
}
