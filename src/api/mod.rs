//! 外部の戦闘サーバーとの通信を定義する。
//! 戦闘ロジックはすべてサーバー側にあり、ここでは結果を受け取るだけ。
use thiserror::Error;

mod fetch_client;
pub use fetch_client::FetchClient;

use crate::interface::{ActionResponse, Battle, BattleAction, CreateBattleRequest};

/// 通信層のエラー。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// リクエストが送信できなかった、または拒否された。
    #[error("{0}")]
    Network(String),
    /// 2xx 以外のステータス。 `body` はレスポンス本文そのまま。
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// 本文が期待した JSON ではなかった。
    #[error("{0}")]
    Decode(String),
    /// リクエストボディを JSON にできなかった。
    #[error("{0}")]
    Encode(String),
}

/// 戦闘サーバーの REST 契約。
///
/// ブラウザでは [`FetchClient`] が実装し、テストではモックに差し替える。
/// シングルスレッドのイベントループ上で使う前提のため、 `Send` は要求しない。
#[allow(async_fn_in_trait)]
pub trait BattleApi {
    /// `POST /battles`
    async fn create_battle(&self, request: &CreateBattleRequest<'_>) -> Result<Battle, ApiError>;

    /// `POST /battles/{id}/start`
    async fn start_battle(&self, battle_id: &str) -> Result<Battle, ApiError>;

    /// `POST /battles/{id}/action`
    async fn submit_action(
        &self,
        battle_id: &str,
        action: &BattleAction,
    ) -> Result<ActionResponse, ApiError>;

    /// `GET /battles/{id}`
    async fn get_battle(&self, battle_id: &str) -> Result<Battle, ApiError>;
}
