//! 抽出結果の型定義
//!
//! - Extraction: 1回の住所抽出の詳細
//! - ScanRecord: 画像1枚分の最終出力（scan → review で受け渡す）

use crate::classifier::Rejection;
use crate::postcode::PostcodeMatch;
use serde::{Deserialize, Serialize};

/// 不採用になった行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedLine {
    /// 行リスト内のインデックス
    pub index: usize,
    pub text: String,
    pub rejection: Rejection,
}

/// 住所抽出の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    /// 組み立てた住所（郵便番号なしの場合は入力テキストそのまま）
    pub address: String,
    pub postcode: Option<PostcodeMatch>,
    /// 採用した住所行（上から順）
    pub address_lines: Vec<String>,
    /// 調べたが不採用になった行（下から調べた順）
    pub rejected: Vec<RejectedLine>,
}

impl Extraction {
    /// 郵便番号が見つからず原文を返した結果か
    pub fn is_fallback(&self) -> bool {
        self.postcode.is_none()
    }
}

/// 画像1枚のスキャン結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub file_name: String,

    /// 画像ファイルの絶対パス
    #[serde(default)]
    pub file_path: String,

    /// スキャン日時（RFC 3339）
    #[serde(default)]
    pub scanned_at: String,

    /// OCRの生テキスト
    #[serde(default)]
    pub raw_text: String,

    /// 抽出した住所（review で上書きされることがある）
    #[serde(default)]
    pub address: String,

    /// マッチした郵便番号
    #[serde(default)]
    pub postcode: Option<String>,

    /// review 済みか
    #[serde(default)]
    pub reviewed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::NoiseReason;

    #[test]
    fn test_scan_record_deserialize_minimal() {
        let json = r#"{"fileName": "label.jpg"}"#;
        let record: ScanRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file_name, "label.jpg");
        assert_eq!(record.address, "");
        assert!(record.postcode.is_none());
        assert!(!record.reviewed);
    }

    #[test]
    fn test_scan_record_camel_case() {
        let record = ScanRecord {
            file_name: "a.jpg".into(),
            raw_text: "BT1 1AA".into(),
            postcode: Some("BT1 1AA".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"fileName\""));
        assert!(json.contains("\"rawText\""));
        assert!(json.contains("\"scannedAt\""));
    }

    #[test]
    fn test_rejection_serialized_with_kind() {
        let rejected = RejectedLine {
            index: 0,
            text: "SHIP TO".into(),
            rejection: Rejection::Noise(NoiseReason::Header),
        };
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["rejection"]["kind"], "noise");
        assert_eq!(json["rejection"]["reason"], "header");
    }

    #[test]
    fn test_is_fallback() {
        let extraction = Extraction {
            address: "no code".into(),
            ..Default::default()
        };
        assert!(extraction.is_fallback());
    }
}
