use log::debug;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::api::{ApiError, BattleApi};
use crate::interface::{ActionResponse, Battle, BattleAction, CreateBattleRequest};

/// ブラウザの `fetch` を使う [`BattleApi`] の実装。
pub struct FetchClient {
    base_url: String,
}

impl FetchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // 2xx なら本文を返す。それ以外は本文ごと Status エラーにする
    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<String, ApiError> {
        let url = self.url(path);
        debug!("{method} {url}");

        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = body.as_deref() {
            opts.set_body(&JsValue::from_str(body));
        }
        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no global window".to_owned()))?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response: Response = value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                body: text,
            });
        }
        Ok(text)
    }
}

impl BattleApi for FetchClient {
    async fn create_battle(&self, request: &CreateBattleRequest<'_>) -> Result<Battle, ApiError> {
        let body = encode(request)?;
        let text = self.send("POST", "battles", Some(body)).await?;
        decode(&text)
    }

    async fn start_battle(&self, battle_id: &str) -> Result<Battle, ApiError> {
        let text = self
            .send("POST", &format!("battles/{battle_id}/start"), None)
            .await?;
        decode(&text)
    }

    async fn submit_action(
        &self,
        battle_id: &str,
        action: &BattleAction,
    ) -> Result<ActionResponse, ApiError> {
        let body = encode(action)?;
        let text = self
            .send("POST", &format!("battles/{battle_id}/action"), Some(body))
            .await?;
        decode(&text)
    }

    async fn get_battle(&self, battle_id: &str) -> Result<Battle, ApiError> {
        let text = self
            .send("GET", &format!("battles/{battle_id}"), None)
            .await?;
        decode(&text)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// JS 側の例外をメッセージ文字列に変換する。
fn js_error(value: JsValue) -> ApiError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    ApiError::Network(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = FetchClient::new("/api/");
        assert_eq!(client.url("battles"), "/api/battles");
        assert_eq!(client.url("/battles/b1/start"), "/api/battles/b1/start");

        let client = FetchClient::new("http://localhost:3000/api");
        assert_eq!(client.url("battles/b1"), "http://localhost:3000/api/battles/b1");
    }

    #[test]
    fn test_encode_failure_is_encode_error() {
        // 文字列以外のキーを持つマップは JSON にできない
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "x");
        let err = encode(&map).unwrap_err();
        assert!(matches!(err, ApiError::Encode(_)));
    }

    #[test]
    fn test_decode_error_message() {
        let err = decode::<Battle>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
