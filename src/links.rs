//! 地図アプリのディープリンク生成
//!
//! 住所文字列（ユーザー編集後を含む）をURLエンコードして
//! ナビゲーション用のリンクにする。住所側では一切エスケープしない。

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 地図サービス
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapProvider {
    #[default]
    Google,
    Apple,
    Waze,
}

impl MapProvider {
    pub const ALL: [MapProvider; 3] = [MapProvider::Google, MapProvider::Apple, MapProvider::Waze];

    pub fn label(&self) -> &'static str {
        match self {
            MapProvider::Google => "Google Maps",
            MapProvider::Apple => "Apple Maps",
            MapProvider::Waze => "Waze",
        }
    }

    /// 住所へのナビゲーションリンク
    pub fn link(&self, address: &str) -> String {
        let encoded = urlencoding::encode(address);
        match self {
            MapProvider::Google => {
                format!("https://www.google.com/maps/search/?api=1&query={}", encoded)
            }
            MapProvider::Apple => format!("https://maps.apple.com/?daddr={}", encoded),
            MapProvider::Waze => format!("https://waze.com/ul?q={}&navigate=yes", encoded),
        }
    }
}

impl std::fmt::Display for MapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapProvider::Google => write!(f, "google"),
            MapProvider::Apple => write!(f, "apple"),
            MapProvider::Waze => write!(f, "waze"),
        }
    }
}

/// 指定サービス（省略時は全サービス）のリンク一覧
pub fn build_links(address: &str, provider: Option<MapProvider>) -> Vec<(MapProvider, String)> {
    let providers: Vec<MapProvider> = match provider {
        Some(p) => vec![p],
        None => MapProvider::ALL.to_vec(),
    };
    providers
        .into_iter()
        .map(|p| (p, p.link(address)))
        .collect()
}

/// 住所の改行をカンマ区切りに寄せる（編集時に改行が入った場合）
pub fn flatten_address(address: &str) -> String {
    address
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
