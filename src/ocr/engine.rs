use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 外部OCRコマンド
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngine {
    #[default]
    Tesseract,
    Easyocr,
}

impl OcrEngine {
    pub fn command_name(&self) -> &'static str {
        match self {
            OcrEngine::Tesseract => "tesseract",
            OcrEngine::Easyocr => "easyocr",
        }
    }

    /// 画像1枚を認識して標準出力にテキストを出す引数
    pub fn args(&self, image: &Path, lang: &str) -> Vec<String> {
        let image = image.display().to_string();
        match self {
            OcrEngine::Tesseract => vec![image, "stdout".into(), "-l".into(), lang.into()],
            OcrEngine::Easyocr => vec![
                "-l".into(),
                easyocr_lang(lang).into(),
                "-f".into(),
                image,
                "--detail".into(),
                "0".into(),
            ],
        }
    }
}

impl std::fmt::Display for OcrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_name())
    }
}

/// tesseract の言語コード（eng）を easyocr 形式（en）へ
fn easyocr_lang(lang: &str) -> &str {
    match lang {
        "eng" => "en",
        "gle" => "ga",
        "cym" => "cy",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesseract_args() {
        let args = OcrEngine::Tesseract.args(Path::new("/tmp/label.jpg"), "eng");
        assert_eq!(args, vec!["/tmp/label.jpg", "stdout", "-l", "eng"]);
    }

    #[test]
    fn test_easyocr_args_lang_mapped() {
        let args = OcrEngine::Easyocr.args(Path::new("label.png"), "eng");
        assert_eq!(args, vec!["-l", "en", "-f", "label.png", "--detail", "0"]);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&OcrEngine::Easyocr).unwrap();
        assert_eq!(json, "\"easyocr\"");
        let engine: OcrEngine = serde_json::from_str("\"tesseract\"").unwrap();
        assert_eq!(engine, OcrEngine::Tesseract);
    }
}
