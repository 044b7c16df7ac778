//! 対話式住所確認モジュール
//!
//! scan の結果を1件ずつ表示し、住所の確定・修正を行う。
//! 修正後の住所はコアに戻さず、そのままリンク生成に使う。

use crate::error::{ParcelAddressError, Result};
use crate::links::{build_links, flatten_address, MapProvider};
use crate::records::{read_records, write_records};
use dialoguer::Input;
use parcel_address_common::ScanRecord;
use std::path::Path;

/// 未確認のレコードを抽出
pub fn extract_unreviewed(records: &[ScanRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.reviewed)
        .map(|(i, _)| i)
        .collect()
}

/// 対話アクション
#[derive(Debug, PartialEq, Eq)]
pub enum ReviewAction {
    /// 提案どおり確定
    Accept,
    /// 編集プロンプトを開く
    Edit,
    /// 入力した文字列で置き換えて確定
    Replace(String),
    /// このレコードをスキップ
    Skip,
    /// 残り全部スキップ
    SkipAll,
    /// 保存して終了
    Quit,
}

/// プロンプトへの入力を解釈
pub fn parse_review_input(input: &str) -> ReviewAction {
    match input.trim() {
        "" | "y" | "Y" => ReviewAction::Accept,
        "e" | "E" => ReviewAction::Edit,
        "s" => ReviewAction::Skip,
        "S" => ReviewAction::SkipAll,
        "q" | "Q" => ReviewAction::Quit,
        other => ReviewAction::Replace(other.to_string()),
    }
}

/// 確定した住所をレコードに反映
pub fn apply_address(record: &mut ScanRecord, address: Option<&str>) {
    if let Some(address) = address {
        let flattened = flatten_address(address);
        if !flattened.is_empty() {
            record.address = flattened;
        }
    }
    record.reviewed = true;
}

/// 対話式で住所を確認
pub fn run_interactive_review(
    input_path: &Path,
    output_path: Option<&Path>,
    provider: MapProvider,
) -> Result<()> {
    if !input_path.exists() {
        return Err(ParcelAddressError::FileNotFound(input_path.display().to_string()));
    }
    let mut records = read_records(input_path)?;

    let pending = extract_unreviewed(&records);
    if pending.is_empty() {
        println!("✓ All addresses have been reviewed");
        return Ok(());
    }

    println!("📦 Addresses to review: {}", pending.len());
    println!("---");
    println!("Keys: [Enter]accept [e]edit [s]skip [S]skip rest [q]quit, or type a new address");
    println!("---\n");

    for (count, &idx) in pending.iter().enumerate() {
        let record = &records[idx];
        println!("[{}/{}] {}", count + 1, pending.len(), record.file_name);
        println!("  OCR text:");
        for line in record.raw_text.lines().filter(|l| !l.trim().is_empty()) {
            println!("    | {}", line.trim());
        }
        if record.postcode.is_none() {
            println!("  (no postcode found, showing raw text)");
        }
        println!("  Address: {}", record.address);

        let action = prompt_review_action()?;

        let confirmed = match action {
            ReviewAction::Accept => {
                apply_address(&mut records[idx], None);
                true
            }
            ReviewAction::Edit => {
                let edited = prompt_edit(&records[idx].address)?;
                apply_address(&mut records[idx], Some(&edited));
                true
            }
            ReviewAction::Replace(address) => {
                apply_address(&mut records[idx], Some(&address));
                true
            }
            ReviewAction::Skip => {
                println!("  → skipped\n");
                false
            }
            ReviewAction::SkipAll => {
                println!("  → skipping the rest\n");
                break;
            }
            ReviewAction::Quit => {
                println!("Saving and exiting...");
                break;
            }
        };

        if confirmed {
            let address = &records[idx].address;
            println!("  → {}", address);
            for (_, link) in build_links(address, Some(provider)) {
                println!("  🗺  {}", link);
            }
            println!();
        }
    }

    // 保存
    let output = output_path.unwrap_or(input_path);
    write_records(output, &records)?;
    println!("\n✓ Saved: {}", output.display());

    Ok(())
}

fn prompt_review_action() -> Result<ReviewAction> {
    let input: String = Input::new()
        .with_prompt("Accept? (Enter/e/s/S/q)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ParcelAddressError::Dialog(e.to_string()))?;

    Ok(parse_review_input(&input))
}

fn prompt_edit(current: &str) -> Result<String> {
    Input::new()
        .with_prompt("Address")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ParcelAddressError::Dialog(e.to_string()))
}
