//! スキャン結果（ScanRecord）の生成と保存

use crate::error::Result;
use crate::ocr::OcrOutput;
use chrono::Local;
use parcel_address_common::{extract, ExtractOptions, ScanRecord};
use rayon::prelude::*;
use std::path::Path;

/// OCR結果から住所を抽出して ScanRecord にする
///
/// 抽出は状態を持たない純粋関数なので画像ごとに並列実行する。
pub fn build_records(outputs: &[OcrOutput], options: &ExtractOptions) -> Vec<ScanRecord> {
    let scanned_at = Local::now().to_rfc3339();

    outputs
        .par_iter()
        .map(|output| {
            let extraction = extract(&output.text, options);
            for rejected in &extraction.rejected {
                tracing::debug!(
                    "{}: skipped line {} {:?} ({})",
                    output.image.file_name,
                    rejected.index,
                    rejected.text,
                    rejected.rejection
                );
            }
            if extraction.is_fallback() {
                tracing::warn!("{}: no postcode found, keeping raw text", output.image.file_name);
            }

            ScanRecord {
                file_name: output.image.file_name.clone(),
                file_path: output.image.path.display().to_string(),
                scanned_at: scanned_at.clone(),
                raw_text: output.text.clone(),
                address: extraction.address,
                postcode: extraction.postcode.map(|p| p.text),
                reviewed: false,
            }
        })
        .collect()
}

pub fn read_records(path: &Path) -> Result<Vec<ScanRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<ScanRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

pub fn write_records(path: &Path, records: &[ScanRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
