pub mod amount_input;
pub mod date_input;
pub mod gift_form;
pub mod layout;
pub mod notice;
pub mod upload_modal;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;

pub use amount_input::AmountInput;
pub use date_input::DateInput;
pub use gift_form::GiftFormModal;
pub use notice::{Notice, NoticeKind, Toast};
pub use upload_modal::UploadModal;

/// Plain-text payload of a paste event.
///
/// `ClipboardEvent` is not exposed on stable `web-sys`, so the clipboard is
/// read through reflection.
pub(crate) fn clipboard_text(event: &Event) -> Option<String> {
    let data = Reflect::get(event.as_ref(), &JsValue::from_str("clipboardData")).ok()?;
    if data.is_null() || data.is_undefined() {
        return None;
    }
    let get_data: Function = Reflect::get(&data, &JsValue::from_str("getData"))
        .ok()?
        .dyn_into()
        .ok()?;
    get_data
        .call1(&data, &JsValue::from_str("text"))
        .ok()?
        .as_string()
}

/// Mounts prebuilt markup. Callers escape user text before building it.
pub(crate) fn raw_html(markup: &str) -> Html {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return html! {};
    };
    match document.create_element("div") {
        Ok(container) => {
            container.set_inner_html(markup);
            Html::VRef(container.into())
        }
        Err(_) => html! {},
    }
}
