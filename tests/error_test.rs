//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use parcel_address::config::Config;
use parcel_address::error::ParcelAddressError;
use parcel_address::records::read_records;
use parcel_address::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(ParcelAddressError::FolderNotFound(_))));
}

/// ファイルをフォルダとして渡した場合
#[test]
fn test_scan_file_instead_of_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("label.jpg");
    std::fs::write(&file, b"dummy").unwrap();

    let result = scanner::scan_folder(&file, false);
    assert!(matches!(result, Err(ParcelAddressError::FolderNotFound(_))));
}

/// 画像のないフォルダは空のVec
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("addresses.json"), "[]").unwrap();

    let result = scanner::scan_folder(dir.path(), false).unwrap();
    assert!(result.is_empty());
}

/// 壊れたスキャン結果JSON
#[test]
fn test_read_records_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("addresses.json");
    std::fs::write(&path, "{ not an array").unwrap();

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, ParcelAddressError::JsonParse(_)));
}

/// 不正な抽出オプションを含む設定ファイル
#[test]
fn test_config_with_invalid_extractor() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"extractor": {"minLetterRatio": 2.0}}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ParcelAddressError::Core(_)));
    assert!(err.to_string().contains("minLetterRatio"));
}

/// タイムアウト0は設定エラー
#[test]
fn test_config_zero_timeout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_seconds": 0}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ParcelAddressError::Config(_)));
}

/// Display実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ParcelAddressError::Config("bad".to_string()),
        ParcelAddressError::FileNotFound("label.txt".to_string()),
        ParcelAddressError::FolderNotFound("/path/to/folder".to_string()),
        ParcelAddressError::NoImagesFound("photos".to_string()),
        ParcelAddressError::OcrExecution("tesseract: not found".to_string()),
        ParcelAddressError::OcrTimeout { file: "a.jpg".to_string(), seconds: 60 },
        ParcelAddressError::Dialog("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty error message: {:?}", err);
    }
}

#[test]
fn test_ocr_timeout_message() {
    let err = ParcelAddressError::OcrTimeout { file: "label.jpg".to_string(), seconds: 30 };
    assert_eq!(err.to_string(), "OCR timed out after 30s: label.jpg");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ParcelAddressError = io_err.into();

    assert!(matches!(err, ParcelAddressError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// common::Errorからの変換（透過的）
#[test]
fn test_common_error_conversion() {
    let common_err = parcel_address_common::Error::Config("separator must not be empty".to_string());
    let err: ParcelAddressError = common_err.into();

    assert!(matches!(err, ParcelAddressError::Core(_)));
    assert_eq!(err.to_string(), "Config error: separator must not be empty");
}
