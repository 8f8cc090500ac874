//! 画面全体の状態と、戦闘サーバーへのリクエストの順序制御を担う。
//!
//! 状態は `Rc<RefCell<_>>` に保持し、 `.await` をまたいで借用しない。
//! 書き込むのは常にこのモジュールの `Session` だけ。
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};

mod turn;
pub use turn::{current_turn, Slot};

use crate::api::{ApiError, BattleApi};
use crate::form::{default_mage, default_warrior, CharacterForm, StatField};
use crate::interface::{Battle, BattleAction, Character, CreateBattleRequest};

pub const OUTDATED_WARNING: &str = "Battle state may be outdated - please refresh";

/// 画面の状態。サーバーから受け取った戦闘は表示用のコピーにすぎない。
#[derive(Debug)]
pub struct AppState {
    pub forms: [CharacterForm; 2],
    pub battle: Option<Battle>,
    pub error: Option<String>,
    /// リクエスト送信中フラグ。立っている間は操作を受け付けない。
    pub loading: bool,
    /// 手番表示用の行動カウンタ。
    pub actions_taken: u32,
    /// 枠ごとの対象選択。 true なら自分自身を対象にする。
    pub target_self: [bool; 2],
    /// リセットのたびに進む世代番号。古いリクエストの完了を見分ける。
    pub generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            forms: [
                CharacterForm::new("Character 1", default_warrior()),
                CharacterForm::new("Character 2", default_mage()),
            ],
            battle: None,
            error: None,
            loading: false,
            actions_taken: 0,
            target_self: [false, false],
            generation: 0,
        }
    }
}

impl AppState {
    pub fn form(&self, slot: Slot) -> &CharacterForm {
        &self.forms[slot.index()]
    }

    pub fn current_turn(&self) -> Option<Slot> {
        self.battle
            .as_ref()
            .and_then(|b| current_turn(b, self.actions_taken))
    }
}

/// リクエストの結果。ログとテストのために返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 送信中のため何もしなかった。
    Suppressed,
    /// 戦闘がないため何もしなかった。
    Ignored,
    /// 応答の戦闘状態をそのまま採用した。
    Applied,
    /// 追加の GET で取得した戦闘状態を採用した。
    Refetched,
    /// 行動は成功したが最新状態を取得できず、古い状態を保持した。
    Stale,
    Failed,
}

enum ActionResult {
    Inline(Battle),
    Fetched(Battle),
    Stale,
    Failed(String),
}

pub struct Session<A> {
    api: A,
    state: Rc<RefCell<AppState>>,
    listener: RefCell<Option<Box<dyn Fn()>>>,
}

impl<A: BattleApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Rc::new(RefCell::new(AppState::default())),
            listener: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    /// 状態が変わるたびに呼ばれるコールバックを設定する。
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    // 借用を解放してから通知する
    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener();
        }
        result
    }

    // -- フォーム --
    pub fn set_name(&self, slot: Slot, name: &str) {
        // フォームの入力中は再描画しない
        self.state.borrow_mut().forms[slot.index()].set_name(name);
    }

    /// 数値欄を更新し、丸めた後の値を返す。
    pub fn set_stat(&self, slot: Slot, field: StatField, input: &str) -> i32 {
        let mut state = self.state.borrow_mut();
        let form = &mut state.forms[slot.index()];
        form.set_stat(field, input);
        form.stat(field)
    }

    // -- 戦闘画面の操作 --
    pub fn set_target(&self, slot: Slot, target_self: bool) {
        self.update(|state| state.target_self[slot.index()] = target_self);
    }

    /// 枠のキャラクターが `ability_index` 番の技を使う行動を組み立てる。
    /// IDが揃っていなければ `None`。
    pub fn action_for(&self, slot: Slot, ability_index: usize) -> Option<BattleAction> {
        let state = self.state.borrow();
        let battle = state.battle.as_ref()?;
        let actor = slot.of(battle);
        let target = if state.target_self[slot.index()] {
            actor
        } else {
            slot.opponent().of(battle)
        };
        if !actor.has_id() || !target.has_id() {
            return None;
        }
        Some(BattleAction {
            character_id: actor.id.clone(),
            ability_index,
            target_id: target.id.clone(),
        })
    }

    /// 戦闘を破棄して作成画面に戻る。フォームの下書きは残す。
    pub fn reset(&self) {
        info!("Resetting battle");
        self.update(|state| {
            state.battle = None;
            state.error = None;
            state.loading = false;
            state.actions_taken = 0;
            state.target_self = [false, false];
            state.generation += 1;
        });
    }

    // -- API --
    /// 戦闘を作成し、続けて開始する。
    /// どちらかが失敗した場合はエラーを表示し、戦闘は設定しない。
    pub async fn create_battle(&self) -> Outcome {
        let drafts = self.update(|state| {
            if state.loading {
                return None;
            }
            state.loading = true;
            state.error = None;
            Some((
                state.generation,
                state.forms[0].character().clone(),
                state.forms[1].character().clone(),
            ))
        });
        let Some((generation, char1, char2)) = drafts else {
            debug!("Create battle suppressed: request in flight");
            return Outcome::Suppressed;
        };

        info!("Creating battle: {} vs {}", char1.name, char2.name);
        let result = self.create_and_start(&char1, &char2).await;

        self.update(|state| {
            // リセット後に届いた結果は、後続のリクエストの送信中フラグごと無視する
            if state.generation != generation {
                warn!("Discarding battle creation result from before a reset");
                return Outcome::Ignored;
            }
            state.loading = false;
            match result {
                Ok(battle) => {
                    info!("Battle started: {} (round {})", battle.id, battle.round);
                    state.battle = Some(battle);
                    state.error = None;
                    state.actions_taken = 0;
                    state.target_self = [false, false];
                    Outcome::Applied
                }
                Err(message) => {
                    error!("Battle creation error: {message}");
                    state.battle = None;
                    state.error = Some(message);
                    Outcome::Failed
                }
            }
        })
    }

    async fn create_and_start(
        &self,
        char1: &Character,
        char2: &Character,
    ) -> Result<Battle, String> {
        let request = CreateBattleRequest {
            character1: char1,
            character2: char2,
        };
        let created = self
            .api
            .create_battle(&request)
            .await
            .map_err(|e| stage_message("Failed to create battle", e))?;
        debug!("Battle created: {:?}", created);

        self.api
            .start_battle(&created.id)
            .await
            .map_err(|e| stage_message("Failed to start battle", e))
    }

    /// 行動を送信する。
    ///
    /// 応答に同じIDの戦闘が含まれていればそれを採用し、なければ一度だけ取得し直す。
    /// 取得し直しに失敗した場合は古い状態を残して警告を表示する。
    pub async fn submit_action(&self, action: BattleAction) -> Outcome {
        let (generation, battle_id) = {
            let state = self.state.borrow();
            let Some(battle) = state.battle.as_ref() else {
                error!("Cannot submit action: no active battle");
                return Outcome::Ignored;
            };
            if state.loading {
                debug!("Action suppressed: request in flight {:?}", action);
                return Outcome::Suppressed;
            }
            (state.generation, battle.id.clone())
        };
        self.update(|state| state.loading = true);

        info!(
            "Submitting action: battle={} actor={} ability={} target={}",
            battle_id, action.character_id, action.ability_index, action.target_id
        );
        let result = self.perform_action(&battle_id, &action).await;

        self.update(|state| {
            // 送信中にリセットされた場合は結果を捨て、送信中フラグにも触れない
            if state.generation != generation {
                warn!("Battle {battle_id} was reset while the action was in flight");
                return Outcome::Ignored;
            }
            state.loading = false;
            state.actions_taken += 1;
            match result {
                ActionResult::Inline(battle) => {
                    state.battle = Some(battle);
                    state.error = None;
                    Outcome::Applied
                }
                ActionResult::Fetched(battle) => {
                    state.battle = Some(battle);
                    state.error = None;
                    Outcome::Refetched
                }
                ActionResult::Stale => {
                    state.error = Some(OUTDATED_WARNING.to_owned());
                    Outcome::Stale
                }
                ActionResult::Failed(message) => {
                    error!("Action submission error: {message}");
                    state.error = Some(message);
                    Outcome::Failed
                }
            }
        })
    }

    async fn perform_action(&self, battle_id: &str, action: &BattleAction) -> ActionResult {
        let response = match self.api.submit_action(battle_id, action).await {
            Ok(response) => response,
            Err(e) => return ActionResult::Failed(stage_message("Failed to submit action", e)),
        };
        debug!("Action response: {:?}", response);

        if !response.success {
            return ActionResult::Failed(response.failure_message());
        }

        match response.battle {
            Some(battle) if battle.id == battle_id => {
                debug!("Using battle state from action response");
                ActionResult::Inline(battle)
            }
            _ => {
                info!("Fetching fresh battle state for {battle_id}");
                match self.api.get_battle(battle_id).await {
                    Ok(battle) => {
                        debug!(
                            "Battle state updated: {} round {} winner {:?}",
                            battle.state,
                            battle.round,
                            battle.winner.as_ref().map(|w| &w.name)
                        );
                        ActionResult::Fetched(battle)
                    }
                    Err(e) => {
                        warn!("Could not fetch updated battle state, keeping current state: {e}");
                        ActionResult::Stale
                    }
                }
            }
        }
    }
}

/// 段階ごとのエラーメッセージ。ステータスエラーは本文を添え、それ以外はそのまま。
fn stage_message(stage: &str, err: ApiError) -> String {
    match err {
        ApiError::Status { body, .. } => format!("{stage}: {body}"),
        other => other.to_string(),
    }
}
