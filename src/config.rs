use log::{warn, Level};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_ROOT_ID: &str = "app";

/// JS 側から `start()` に渡される設定。
/// 省略された項目は既定値で補完される。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 戦闘サーバーのベースURL。
    pub api_base_url: String,
    /// 描画先の要素ID。
    pub root_id: String,
    /// `error` / `warn` / `info` / `debug` / `trace`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            root_id: DEFAULT_ROOT_ID.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl AppConfig {
    /// JS の値から設定を読む。 `undefined` / `null` は既定値。
    pub fn from_js(value: JsValue) -> Result<Self, serde_wasm_bindgen::Error> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
    }

    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::Info)
    }

    /// 受けとった設定の妥当性を検証し、必要に応じて修正する。
    /// 修正可能な例外
    /// - ベースURL末尾のスラッシュ
    /// - 空のベースURL、空の要素ID
    /// - 不明なログレベル
    pub fn validate(&mut self) {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed != self.api_base_url {
            warn!("API base URL normalized: {:?} -> {:?}", self.api_base_url, trimmed);
            self.api_base_url = trimmed.to_owned();
        }
        if self.api_base_url.is_empty() {
            warn!("API base URL is empty, using {DEFAULT_API_BASE_URL}");
            self.api_base_url = DEFAULT_API_BASE_URL.to_owned();
        }
        if self.root_id.trim().is_empty() {
            warn!("Root element id is empty, using #{DEFAULT_ROOT_ID}");
            self.root_id = DEFAULT_ROOT_ID.to_owned();
        }
        if self.log_level.parse::<Level>().is_err() {
            warn!("Unknown log level {:?}, using info", self.log_level);
            self.log_level = "info".to_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"apiBaseUrl": "http://localhost:3000/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.root_id, "app");
        assert_eq!(config.level(), Level::Info);
    }

    #[test]
    fn test_validate_normalizes() {
        let mut config = AppConfig {
            api_base_url: "http://localhost:3000/api/".to_owned(),
            root_id: " ".to_owned(),
            log_level: "loud".to_owned(),
        };
        config.validate();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.root_id, "app");
        assert_eq!(config.log_level, "info");

        let mut config = AppConfig {
            api_base_url: "/".to_owned(),
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.api_base_url, "/api");
    }

    #[test]
    fn test_level_parse() {
        let config = AppConfig {
            log_level: "debug".to_owned(),
            ..Default::default()
        };
        assert_eq!(config.level(), Level::Debug);
    }
}
