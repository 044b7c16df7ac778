//! 住所行 / ノイズ行の判定
//!
//! ラベルのOCRではバーコードやトラッキング番号が記号・数字だらけの
//! 文字列に化ける。判定は2段構え:
//! - `noise_reason`: 構造的にありえない行（記号過多、長すぎる、ヘッダ等）
//! - `invalid_reason`: 住所行として情報が足りない行（英字なし、比率不足）
//!
//! 両方を通過した行だけを住所行として採用する。
//! 長さ・個数はすべて文字数（char）で数える。

use crate::options::{default_options, ExtractOptions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 短い行で出てきたら即ノイズとみなす記号
const SHORT_LINE_SYMBOLS: &[char] = &[
    '₤', '$', '€', '¥', '#', '@', '%', '&', '*', '+', '=', '<', '>',
];

/// 記号密度の計算対象
const SPECIAL_CHARS: &[char] = &[
    '£', '$', '€', '¥', '#', '@', '%', '&', '*', '+', '=', '<', '>', '[', ']', '{', '}', '|',
    '\\', '/', '~', '`', '^',
];

/// ラベルのヘッダ行の先頭キーワード
const HEADER_KEYWORDS: &[&str] = &[
    "SHIP", "DELIVERY", "ADDRESS", "TO", "FROM", "ORDER", "TRACKING", "PARCEL", "REF",
];

const SHORT_SYMBOL_MAX_LENGTH: usize = 4;
const MAX_SPECIAL_CHARS: usize = 2;
const SPECIAL_DENSE_MAX_LENGTH: usize = 8;
const MIN_LETTERS: usize = 2;

/// ノイズと判定した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoiseReason {
    /// 4文字未満で通貨・記号を含む
    ShortSymbol,
    /// 記号が多すぎる（バーコード・QRの誤認識）
    SymbolDense,
    /// 空白なしで英字・数字・記号が混在
    GarbledToken,
    /// 長すぎる
    TooLong,
    /// 英数字の長い連続（トラッキング番号）
    TrackingNumber,
    /// "SHIP TO" 等のヘッダ
    Header,
    /// 数字ばかりの長い行
    NumericRun,
    /// 英字が少なすぎる
    TooFewLetters,
}

/// 住所行として不十分と判定した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidReason {
    NoLetters,
    BadLength,
    LowLetterRatio,
}

/// 不採用の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "camelCase")]
pub enum Rejection {
    Invalid(InvalidReason),
    Noise(NoiseReason),
}

impl fmt::Display for NoiseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NoiseReason::ShortSymbol => "short line with symbol",
            NoiseReason::SymbolDense => "too many symbols",
            NoiseReason::GarbledToken => "garbled token",
            NoiseReason::TooLong => "line too long",
            NoiseReason::TrackingNumber => "tracking number",
            NoiseReason::Header => "label header",
            NoiseReason::NumericRun => "mostly digits",
            NoiseReason::TooFewLetters => "too few letters",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::NoLetters => "no letters",
            InvalidReason::BadLength => "length out of range",
            InvalidReason::LowLetterRatio => "low letter ratio",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Invalid(reason) => write!(f, "invalid: {}", reason),
            Rejection::Noise(reason) => write!(f, "noise: {}", reason),
        }
    }
}

/// 1行分の文字種カウント
#[derive(Debug, Default)]
struct LineStats {
    len: usize,
    letters: usize,
    digits: usize,
    spaces: usize,
    specials: usize,
    has_short_symbol: bool,
}

impl LineStats {
    fn of(line: &str) -> Self {
        let mut stats = LineStats::default();
        for c in line.chars() {
            stats.len += 1;
            if c.is_alphabetic() {
                stats.letters += 1;
            } else if c.is_ascii_digit() {
                stats.digits += 1;
            } else if c.is_whitespace() {
                stats.spaces += 1;
            }
            if SPECIAL_CHARS.contains(&c) {
                stats.specials += 1;
            }
            if SHORT_LINE_SYMBOLS.contains(&c) {
                stats.has_short_symbol = true;
            }
        }
        stats
    }

    fn ratio(count: usize, len: usize) -> f64 {
        if len == 0 {
            0.0
        } else {
            count as f64 / len as f64
        }
    }
}

// =============================================
// ノイズ判定ルール（上から順に評価）
// =============================================

fn is_short_symbol(stats: &LineStats) -> bool {
    stats.len < SHORT_SYMBOL_MAX_LENGTH && stats.has_short_symbol
}

fn is_symbol_dense(stats: &LineStats) -> bool {
    stats.specials > MAX_SPECIAL_CHARS
        || (stats.specials > 0 && stats.len < SPECIAL_DENSE_MAX_LENGTH)
}

fn is_garbled_token(stats: &LineStats) -> bool {
    stats.spaces == 0 && stats.letters > 0 && stats.digits > 0 && stats.specials > 0
}

fn is_too_long(stats: &LineStats, options: &ExtractOptions) -> bool {
    stats.len > options.max_noise_length
}

fn is_tracking_number(line: &str, options: &ExtractOptions) -> bool {
    let mut count = 0;
    for c in line.chars().filter(|c| !c.is_whitespace()) {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return false;
        }
        count += 1;
    }
    count >= options.tracking_run_min_length
}

fn is_header(line: &str, stats: &LineStats) -> bool {
    if stats.letters == 0 || line.chars().any(char::is_lowercase) {
        return false;
    }
    let upper = line.to_uppercase();
    HEADER_KEYWORDS.iter().any(|keyword| upper.starts_with(keyword))
}

fn is_numeric_run(stats: &LineStats, options: &ExtractOptions) -> bool {
    LineStats::ratio(stats.digits, stats.len) > options.max_digit_ratio
        && stats.len > options.digit_run_min_length
}

fn is_too_few_letters(stats: &LineStats, options: &ExtractOptions) -> bool {
    stats.letters < MIN_LETTERS && stats.len > options.short_line_length
}

/// ノイズ行なら最初に該当したルールを返す
pub fn noise_reason_with(line: &str, options: &ExtractOptions) -> Option<NoiseReason> {
    let stats = LineStats::of(line);

    if is_short_symbol(&stats) {
        Some(NoiseReason::ShortSymbol)
    } else if is_symbol_dense(&stats) {
        Some(NoiseReason::SymbolDense)
    } else if is_garbled_token(&stats) {
        Some(NoiseReason::GarbledToken)
    } else if is_too_long(&stats, options) {
        Some(NoiseReason::TooLong)
    } else if is_tracking_number(line, options) {
        Some(NoiseReason::TrackingNumber)
    } else if is_header(line, &stats) {
        Some(NoiseReason::Header)
    } else if is_numeric_run(&stats, options) {
        Some(NoiseReason::NumericRun)
    } else if is_too_few_letters(&stats, options) {
        Some(NoiseReason::TooFewLetters)
    } else {
        None
    }
}

/// 住所行として不十分なら理由を返す
pub fn invalid_reason_with(line: &str, options: &ExtractOptions) -> Option<InvalidReason> {
    let stats = LineStats::of(line);

    if stats.letters == 0 {
        return Some(InvalidReason::NoLetters);
    }
    if stats.len < options.min_valid_length || stats.len > options.max_valid_length {
        return Some(InvalidReason::BadLength);
    }
    // 短い行（番地+短い名前など）は比率チェック免除
    let ratio = LineStats::ratio(stats.letters + stats.spaces, stats.len);
    if ratio < options.min_letter_ratio && stats.len > options.short_line_length {
        return Some(InvalidReason::LowLetterRatio);
    }
    None
}

/// 不採用なら理由を返す（有効性チェックを先に行う）
pub fn rejection_with(line: &str, options: &ExtractOptions) -> Option<Rejection> {
    invalid_reason_with(line, options)
        .map(Rejection::Invalid)
        .or_else(|| noise_reason_with(line, options).map(Rejection::Noise))
}

pub fn noise_reason(line: &str) -> Option<NoiseReason> {
    noise_reason_with(line, default_options())
}

pub fn invalid_reason(line: &str) -> Option<InvalidReason> {
    invalid_reason_with(line, default_options())
}

pub fn rejection(line: &str) -> Option<Rejection> {
    rejection_with(line, default_options())
}

/// パッケージ情報・OCRノイズの行か
pub fn is_noise(line: &str) -> bool {
    noise_reason(line).is_some()
}

/// 住所行として最低限の情報を持つか
pub fn is_valid(line: &str) -> bool {
    invalid_reason(line).is_none()
}

/// 住所行として採用するか
pub fn is_address_line(line: &str) -> bool {
    is_address_line_with(line, default_options())
}

pub fn is_address_line_with(line: &str, options: &ExtractOptions) -> bool {
    rejection_with(line, options).is_none()
}
