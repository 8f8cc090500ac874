use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement};

use crate::api::FetchClient;
use crate::config::AppConfig;
use crate::form::StatField;
use crate::session::{Session, Slot};
use crate::view::render_app;

type AppSession = Session<FetchClient>;

/// ルート要素にアプリを描画し、イベントを配線する。
/// イベントはルート要素で委譲して受け取り、 `data-*` 属性で振り分ける。
pub fn mount(config: &AppConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let root = document
        .get_element_by_id(&config.root_id)
        .ok_or_else(|| JsValue::from_str(&format!("root element #{} not found", config.root_id)))?;

    let session = Rc::new(Session::new(FetchClient::new(&config.api_base_url)));

    let weak = Rc::downgrade(&session);
    let render_root = root.clone();
    session.set_listener(move || {
        if let Some(session) = weak.upgrade() {
            render(&render_root, &session);
        }
    });
    render(&root, &session);

    listen(&root, "click", session.clone(), on_click)?;
    listen(&root, "input", session.clone(), on_input)?;
    listen(&root, "change", session, on_change)?;

    info!("Mounted into #{} (api: {})", config.root_id, config.api_base_url);
    Ok(())
}

fn render(root: &Element, session: &AppSession) {
    root.set_inner_html(&render_app(&session.state()));
}

fn listen(
    root: &Element,
    event_name: &str,
    session: Rc<AppSession>,
    handler: fn(&Rc<AppSession>, Event),
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&session, event));
    root.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
    // アプリの寿命と同じなので解放しない
    closure.forget();
    Ok(())
}

// -- イベントハンドラ --
fn on_click(session: &Rc<AppSession>, event: Event) {
    let Some(element) = event_target_closest(&event, "[data-action]") else {
        return;
    };
    match element.get_attribute("data-action").as_deref() {
        Some("create") => {
            let session = session.clone();
            spawn_local(async move {
                let outcome = session.create_battle().await;
                debug!("Create battle finished: {:?}", outcome);
            });
        }
        Some("reset") => session.reset(),
        Some("ability") => {
            let (Some(slot), Some(index)) = (slot_of(&element), data_usize(&element, "data-ability"))
            else {
                warn!("Ability button without slot or index");
                return;
            };
            let Some(action) = session.action_for(slot, index) else {
                debug!("Action blocked: missing character or target ID");
                return;
            };
            let session = session.clone();
            spawn_local(async move {
                let outcome = session.submit_action(action).await;
                debug!("Action finished: {:?}", outcome);
            });
        }
        _ => {}
    }
}

fn on_input(session: &Rc<AppSession>, event: Event) {
    let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let (Some(slot), Some(field)) = (slot_of(&input), input.get_attribute("data-field")) else {
        return;
    };
    if field == "name" {
        session.set_name(slot, &input.value());
        return;
    }
    let Some(stat) = StatField::from_key(&field) else {
        warn!("Unknown form field: {field}");
        return;
    };
    let clamped = session.set_stat(slot, stat, &input.value());
    // 丸めた値を入力欄に書き戻す。全体の再描画はフォーカスを失うので行わない
    if input.value() != clamped.to_string() {
        input.set_value(&clamped.to_string());
    }
}

fn on_change(session: &Rc<AppSession>, event: Event) {
    let Some(select) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    if select.get_attribute("data-action").as_deref() != Some("target") {
        return;
    }
    if let Some(slot) = slot_of(&select) {
        session.set_target(slot, select.value() == "self");
    }
}

// -- 属性ヘルパ --
fn event_target_closest(event: &Event, selector: &str) -> Option<Element> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    element.closest(selector).ok().flatten()
}

fn data_usize(element: &Element, name: &str) -> Option<usize> {
    element.get_attribute(name)?.parse().ok()
}

fn slot_of(element: &Element) -> Option<Slot> {
    data_usize(element, "data-slot").and_then(Slot::from_index)
}
