//! 画面の描画。状態から HTML 文字列を組み立てる純粋な関数群と、
//! それを DOM に流し込んでイベントを配線する薄い層からなる。
//!
//! 表示はサーバーが返した列挙値による条件分岐のみで、ゲームの判定は行わない。
use itertools::Itertools;

mod dom;
mod html;
pub use dom::mount;

use crate::form::{CharacterForm, StatField};
use crate::interface::{Battle, Character};
use crate::session::{AppState, Slot};
use html::{disabled_attr, escape};

const DEFAULT_ABILITY_LABELS: [&str; 2] = ["Basic Attack", "Special Attack"];

/// 画面全体を描画する。
pub fn render_app(state: &AppState) -> String {
    let mut out = String::from(r#"<div class="App"><h1>Turn-Based Battle</h1>"#);

    if let Some(error) = &state.error {
        out.push_str(&format!(
            r#"<div class="error">{}<button class="reset-button" data-action="reset">Start New Battle</button></div>"#,
            escape(error)
        ));
    }
    if state.loading {
        out.push_str(r#"<div class="loading">Loading...</div>"#);
    }

    match &state.battle {
        None => out.push_str(&render_setup(state)),
        Some(battle) => {
            out.push_str(&render_battle(battle, state));
            if battle.is_complete() {
                out.push_str(
                    r#"<button class="reset-button" data-action="reset">Start New Battle</button>"#,
                );
            }
        }
    }

    out.push_str("</div>");
    out
}

// -- 作成画面 --
fn render_setup(state: &AppState) -> String {
    let forms = Slot::ALL
        .iter()
        .map(|slot| render_form(state.form(*slot), *slot))
        .join("");
    let label = if state.loading {
        "Creating Battle..."
    } else {
        "Create Battle"
    };
    format!(
        r#"<h2>Create New Battle</h2><div class="battle-container">{forms}</div><button class="create-battle-button" data-action="create"{}>{label}</button>"#,
        disabled_attr(state.loading)
    )
}

/// キャラクター設定フォームを描画する。
pub fn render_form(form: &CharacterForm, slot: Slot) -> String {
    let character = form.character();
    let slot_index = slot.index();
    let mut out = format!(
        r#"<div class="character-form"><h3>{label}</h3><div class="form-group"><label for="{id}">Name</label><input id="{id}" type="text" value="{name}" placeholder="Enter character name" data-slot="{slot_index}" data-field="name"></div>"#,
        label = escape(form.label()),
        id = escape(&form.input_id("name")),
        name = escape(&character.name),
    );
    for field in StatField::ALL {
        out.push_str(&format!(
            r#"<div class="form-group"><label for="{id}">{field}</label><input id="{id}" type="number" value="{value}" min="{min}" max="{max}" data-slot="{slot_index}" data-field="{key}"></div>"#,
            id = escape(&form.input_id(field.key())),
            value = form.stat(field),
            min = field.min(),
            max = field.max(),
            key = field.key(),
        ));
    }
    out.push_str("</div>");
    out
}

// -- 戦闘画面 --
/// 戦闘画面を描画する。勝者は専用バナーとログ行にそれぞれ一度だけ表示する。
pub fn render_battle(battle: &Battle, state: &AppState) -> String {
    let winner = battle.decided_winner().map(|w| escape(&w.name));

    let mut out = format!(
        r#"<div id="battle-view"><div class="battle-status"><div>Round {} - {}</div>"#,
        battle.round, battle.state
    );
    if let Some(name) = &winner {
        out.push_str(&format!(r#"<div class="winner">Winner: {name}</div>"#));
    }
    out.push_str(r#"</div><div class="battle-container">"#);
    for slot in Slot::ALL {
        out.push_str(&render_character(battle, slot, state));
    }
    out.push_str("</div>");
    if let Some(name) = &winner {
        out.push_str(&format!(
            r#"<div class="battle-log">Battle ended! Winner: {name}</div>"#
        ));
    }
    out.push_str("</div>");
    out
}

/// キャラクターカードを描画する。手番でなければ操作は無効になる。
pub fn render_character(battle: &Battle, slot: Slot, state: &AppState) -> String {
    let character = slot.of(battle);
    let opponent = slot.opponent().of(battle);
    let target_self = state.target_self[slot.index()];
    let is_current_turn = state.current_turn() == Some(slot);

    let controls_disabled = !battle.is_active() || !is_current_turn || state.loading;
    let target = if target_self { character } else { opponent };
    let buttons_disabled = controls_disabled || !character.has_id() || !target.has_id();

    let card_class = if is_current_turn {
        "character-card current-turn"
    } else {
        "character-card"
    };

    format!(
        r#"<div class="{card_class}"><h2>{name}</h2><div class="stats"><div>Health: {health}</div><div>Attack: {attack}</div><div>Defense: {defense}</div><div>Speed: {speed}</div></div><div class="status-effects">{effects}</div><div class="actions"><select data-action="target" data-slot="{slot_index}"{select_disabled}><option value="enemy"{enemy_selected}>Target Enemy</option><option value="self"{self_selected}>Target Self</option></select><div class="ability-buttons">{buttons}</div></div></div>"#,
        name = escape(&character.name),
        health = character.health,
        attack = character.attack,
        defense = character.defense,
        speed = character.speed,
        effects = render_status_effects(character),
        slot_index = slot.index(),
        select_disabled = disabled_attr(controls_disabled),
        enemy_selected = if target_self { "" } else { " selected" },
        self_selected = if target_self { " selected" } else { "" },
        buttons = render_ability_buttons(character, slot, buttons_disabled),
    )
}

fn render_status_effects(character: &Character) -> String {
    if character.status_effects.is_empty() {
        return String::new();
    }
    let names = character
        .status_effects
        .iter()
        .map(|e| escape(e.kind.as_str()))
        .join(", ");
    format!("Status Effects: {names}")
}

// 0番と1番のボタンは技が無くても既定のラベルで表示する。
// 0番は常に "Basic Attack"
fn render_ability_buttons(character: &Character, slot: Slot, disabled: bool) -> String {
    let count = character.abilities.len().max(DEFAULT_ABILITY_LABELS.len());
    (0..count)
        .map(|index| {
            let ability = character.ability(index);
            let name = match ability {
                Some(a) if index > 0 && !a.name.is_empty() => a.name.as_str(),
                _ => DEFAULT_ABILITY_LABELS.get(index).copied().unwrap_or("Ability"),
            };
            let cooldown = match ability {
                Some(a) if a.cooldown > 0 => format!(" (cooldown {})", a.cooldown),
                _ => String::new(),
            };
            let class = match index {
                0 => "basic-attack",
                1 => "special-attack",
                _ => "ability",
            };
            format!(
                r#"<button class="{class}" data-action="ability" data-slot="{}" data-ability="{index}"{}>{}{cooldown}</button>"#,
                slot.index(),
                disabled_attr(disabled),
                escape(name),
            )
        })
        .join("")
}
