//! 抽出オプション
//!
//! しきい値はすべて実際のラベル写真で経験的に調整した値。
//! 設定ファイルから上書きできるよう1つの構造体にまとめる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

lazy_static::lazy_static! {
    static ref DEFAULT_OPTIONS: ExtractOptions = ExtractOptions::default();
}

/// デフォルト値の共有インスタンス
pub(crate) fn default_options() -> &'static ExtractOptions {
    &DEFAULT_OPTIONS
}

/// 住所抽出のしきい値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// 郵便番号の前に残す住所行の最大数
    pub max_address_lines: usize,
    /// 郵便番号から遡って調べる行の最大数（採用・不採用を問わず）
    pub max_inspected_lines: usize,
    /// これより長い行はトラッキング情報とみなす
    pub max_noise_length: usize,
    /// 住所行として有効な最短の長さ
    pub min_valid_length: usize,
    /// 住所行として有効な最長の長さ
    pub max_valid_length: usize,
    /// この長さ以下の行は文字比率チェックを免除
    pub short_line_length: usize,
    /// (英字+空白)/長さ の下限
    pub min_letter_ratio: f64,
    /// 数字/長さ がこれを超えると番号列とみなす
    pub max_digit_ratio: f64,
    /// 数字比率チェックを行う最短の長さ（これを超える行のみ）
    pub digit_run_min_length: usize,
    /// 英数字だけの連続がこの長さ以上ならトラッキング番号
    pub tracking_run_min_length: usize,
    /// 住所行の区切り
    pub separator: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_address_lines: 4,
            max_inspected_lines: 8,
            max_noise_length: 40,
            min_valid_length: 2,
            max_valid_length: 50,
            short_line_length: 5,
            min_letter_ratio: 0.4,
            max_digit_ratio: 0.8,
            digit_run_min_length: 10,
            tracking_run_min_length: 15,
            separator: ", ".to_string(),
        }
    }
}

impl ExtractOptions {
    /// JSON文字列から読み込み、検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ExtractOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// JSONファイルから読み込み、検証する
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 設定値の整合性チェック
    pub fn validate(&self) -> Result<()> {
        if self.max_address_lines == 0 {
            return Err(Error::Config("maxAddressLines must be at least 1".into()));
        }
        if self.max_inspected_lines == 0 {
            return Err(Error::Config("maxInspectedLines must be at least 1".into()));
        }
        if self.min_valid_length > self.max_valid_length {
            return Err(Error::Config(format!(
                "minValidLength ({}) is greater than maxValidLength ({})",
                self.min_valid_length, self.max_valid_length
            )));
        }
        for (name, ratio) in [
            ("minLetterRatio", self.min_letter_ratio),
            ("maxDigitRatio", self.max_digit_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::Config(format!(
                    "{} must be between 0.0 and 1.0 (got {})",
                    name, ratio
                )));
            }
        }
        if self.separator.is_empty() {
            return Err(Error::Config("separator must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let options = ExtractOptions::default();
        assert_eq!(options.max_address_lines, 4);
        assert_eq!(options.max_inspected_lines, 8);
        assert_eq!(options.max_noise_length, 40);
        assert_eq!(options.max_valid_length, 50);
        assert_eq!(options.separator, ", ");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options = ExtractOptions::from_json(r#"{"maxAddressLines": 3, "separator": " / "}"#).unwrap();
        assert_eq!(options.max_address_lines, 3);
        assert_eq!(options.separator, " / ");
        // 指定なしはデフォルト値
        assert_eq!(options.max_inspected_lines, 8);
    }

    #[test]
    fn test_validate_zero_lines() {
        let options = ExtractOptions {
            max_address_lines: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_ratio_out_of_range() {
        let options = ExtractOptions {
            min_letter_ratio: 1.5,
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("minLetterRatio"));
    }

    #[test]
    fn test_validate_length_order() {
        let options = ExtractOptions {
            min_valid_length: 60,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            ExtractOptions::from_json("not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            ExtractOptions::from_json(r#"{"separator": ""}"#),
            Err(Error::Config(_))
        ));
    }
}
