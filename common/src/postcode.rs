//! 郵便番号の検出
//!
//! UK / 北アイルランドの郵便番号（例: "SW1A 1AA", "BT1 1AA"）を
//! 行リストの上から探し、最初に見つかったものだけを採用する。

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    // 英字1-2 + 数字 + 英数字(任意) + 空白(任意) + 数字 + 英字2
    static ref POSTCODE_RE: Regex =
        Regex::new(r"(?i)[A-Z]{1,2}[0-9][A-Z0-9]?\s*[0-9][A-Z]{2}").unwrap();
}

/// 検出した郵便番号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcodeMatch {
    /// 行リスト内のインデックス
    pub index: usize,
    /// マッチした文字列（大文字小文字はそのまま）
    pub text: String,
}

impl PostcodeMatch {
    /// 表示用に正規化（大文字化、outward/inward の間に空白1つ）
    ///
    /// 住所文字列の組み立てには使わない。
    pub fn normalized(&self) -> String {
        let compact: String = self
            .text
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        // inward code は常に末尾3文字
        match compact.char_indices().rev().nth(2) {
            Some((split, _)) => format!("{} {}", &compact[..split], &compact[split..]),
            None => compact,
        }
    }
}

/// 1行の中から郵便番号部分を探す
pub fn find_postcode(line: &str) -> Option<&str> {
    POSTCODE_RE.find(line).map(|m| m.as_str())
}

/// テキストに郵便番号らしき部分が含まれるか
pub fn contains_postcode(text: &str) -> bool {
    POSTCODE_RE.is_match(text)
}

/// 行リストを上から走査し、最初の郵便番号を返す
///
/// 2つ目以降の候補は無視する（宛先の郵便番号は通常1つだけ）。
pub fn locate_postcode<S: AsRef<str>>(lines: &[S]) -> Option<PostcodeMatch> {
    lines.iter().enumerate().find_map(|(index, line)| {
        find_postcode(line.as_ref()).map(|text| PostcodeMatch {
            index,
            text: text.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_postcode_formats() {
        assert_eq!(find_postcode("SW1A 1AA"), Some("SW1A 1AA"));
        assert_eq!(find_postcode("BT1 1AA"), Some("BT1 1AA"));
        assert_eq!(find_postcode("M1 1AE"), Some("M1 1AE"));
        assert_eq!(find_postcode("B33 8TH"), Some("B33 8TH"));
        assert_eq!(find_postcode("CR2 6XH"), Some("CR2 6XH"));
        assert_eq!(find_postcode("DN55 1PT"), Some("DN55 1PT"));
    }

    #[test]
    fn test_find_postcode_without_space() {
        assert_eq!(find_postcode("EC1A1BB"), Some("EC1A1BB"));
    }

    #[test]
    fn test_find_postcode_case_preserved() {
        assert_eq!(find_postcode("sw1a 1aa"), Some("sw1a 1aa"));
        assert_eq!(find_postcode("Bt7 1nn"), Some("Bt7 1nn"));
    }

    #[test]
    fn test_find_postcode_substring_only() {
        assert_eq!(find_postcode("LONDON SW1A 1AA UK"), Some("SW1A 1AA"));
        assert_eq!(find_postcode("Belfast, BT9 5AB"), Some("BT9 5AB"));
    }

    #[test]
    fn test_find_postcode_none() {
        assert_eq!(find_postcode("JOHN SMITH"), None);
        assert_eq!(find_postcode("42 HIGH STREET"), None);
        assert_eq!(find_postcode("AB1234567890123456789"), None);
        assert_eq!(find_postcode(""), None);
        assert_eq!(find_postcode("£$%&"), None);
    }

    #[test]
    fn test_locate_first_line_wins() {
        let lines = vec!["JOHN SMITH", "LONDON", "SW1A 1AA", "BT1 1AA"];
        let found = locate_postcode(&lines).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.text, "SW1A 1AA");
    }

    #[test]
    fn test_locate_first_match_within_line() {
        let lines = vec!["SW1A 1AA BT1 1AA"];
        let found = locate_postcode(&lines).unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.text, "SW1A 1AA");
    }

    #[test]
    fn test_locate_not_found() {
        let lines = vec!["JOHN SMITH", "42 HIGH STREET"];
        assert!(locate_postcode(&lines).is_none());

        let empty: Vec<String> = Vec::new();
        assert!(locate_postcode(&empty).is_none());
    }

    #[test]
    fn test_contains_postcode() {
        assert!(contains_postcode("deliver to\nBT1 1AA"));
        assert!(!contains_postcode("no code here"));
    }

    #[test]
    fn test_normalized() {
        let m = PostcodeMatch { index: 0, text: "sw1a1aa".into() };
        assert_eq!(m.normalized(), "SW1A 1AA");

        let m = PostcodeMatch { index: 0, text: "BT1   1AA".into() };
        assert_eq!(m.normalized(), "BT1 1AA");

        let m = PostcodeMatch { index: 0, text: "M1 1AE".into() };
        assert_eq!(m.normalized(), "M1 1AE");
    }
}
