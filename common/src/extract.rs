//! OCRテキストからの住所抽出
//!
//! 処理フロー:
//! 1. 改行で分割し、前後の空白を除いて空行を捨てる
//! 2. 上から最初の郵便番号を探す
//! 3. 郵便番号の行から上へ遡って住所を組み立てる
//!
//! 郵便番号が見つからない場合は入力テキストをそのまま返す。

use crate::assembler::assemble_with;
use crate::options::{default_options, ExtractOptions};
use crate::postcode::locate_postcode;
use crate::types::Extraction;

/// テキストを行リストに分割（trim済み、空行なし、順序維持）
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// OCRテキストから住所文字列を抽出する
///
/// # Examples
/// ```
/// use parcel_address_common::extract_address;
///
/// let text = "SHIP TO\nJOHN SMITH\n42 HIGH STREET\nBELFAST\nBT1 1AA";
/// assert_eq!(extract_address(text), "JOHN SMITH, 42 HIGH STREET, BELFAST, BT1 1AA");
///
/// // 郵便番号がなければそのまま返す
/// assert_eq!(extract_address("no postcode here"), "no postcode here");
/// ```
pub fn extract_address(raw: &str) -> String {
    extract_address_with(raw, default_options())
}

pub fn extract_address_with(raw: &str, options: &ExtractOptions) -> String {
    extract(raw, options).address
}

/// 詳細付きで抽出する
pub fn extract(raw: &str, options: &ExtractOptions) -> Extraction {
    let lines = split_lines(raw);

    match locate_postcode(&lines) {
        Some(postcode) => assemble_with(&lines, &postcode, options),
        None => Extraction {
            address: raw.to_string(),
            ..Default::default()
        },
    }
}
