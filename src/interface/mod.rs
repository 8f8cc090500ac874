//! バックエンドとフロントエンド間のインターフェースを定義する。
//! このモジュールで定義される構造体は、シリアライズ/デシリアライズ可能でなければならない。
//! また、それらのメソッドは単なるゲッターに限定し、原則的にロジックを含めてはならない。
//! サーバーから受け取った値はそのまま保持し、クライアント側で戦闘結果を再現してはならない。
mod battle;
mod character;
mod status;

pub use battle::{ActionResponse, Battle, BattleAction, BattleState, CreateBattleRequest};
pub use character::{Ability, Character};
pub use status::{StatusEffect, StatusKind};
