use crate::error::{ParcelAddressError, Result};
use crate::links::MapProvider;
use crate::ocr::OcrEngine;
use parcel_address_common::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr_engine: OcrEngine,
    pub ocr_lang: String,
    pub timeout_seconds: u64,
    pub map_provider: MapProvider,
    pub extractor: ExtractOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_engine: OcrEngine::Tesseract,
            ocr_lang: "eng".into(),
            timeout_seconds: 60,
            map_provider: MapProvider::Google,
            extractor: ExtractOptions::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.extractor.validate()?;
        if config.timeout_seconds == 0 {
            return Err(ParcelAddressError::Config(
                "timeout_seconds must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ParcelAddressError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("parcel-address").join("config.json"))
    }
}
