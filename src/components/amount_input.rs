use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::clipboard_text;
use crate::amount::{self, AmountFieldState};

#[derive(Properties, PartialEq)]
pub struct AmountInputProps {
    pub value: AmountFieldState,
    pub on_change: Callback<AmountFieldState>,
    #[prop_or_default]
    pub id: AttrValue,
    #[prop_or(AttrValue::from("amount"))]
    pub name: AttrValue,
}

/// Thousands-grouped amount entry with a hidden canonical twin.
#[function_component(AmountInput)]
pub fn amount_input(props: &AmountInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let next = amount::on_input(&input.value());
            // The DOM keeps stripped characters if the state did not change.
            input.set_value(&next.display_value);
            on_change.emit(next);
        })
    };

    let onpaste = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            e.prevent_default();
            let text = clipboard_text(&e).unwrap_or_default();
            let next = amount::on_paste(&text);
            let input: HtmlInputElement = e.target_unchecked_into();
            input.set_value(&next.display_value);
            on_change.emit(next);
        })
    };

    html! {
        <div class="relative">
            <input
                type="text"
                inputmode="numeric"
                autocomplete="off"
                id={props.id.clone()}
                placeholder="0"
                value={props.value.display_value.clone()}
                {oninput}
                {onpaste}
                class="w-full bg-[#f1f4f9] rounded-[10px] pl-3 pr-8 py-2 text-[13px] text-[#173E63] border-none text-right"
            />
            <span class="absolute right-3 top-1/2 -translate-y-1/2 text-[12px] text-muted-foreground">{"원"}</span>
            <input type="hidden" name={props.name.clone()} value={props.value.canonical_value.clone()} />
        </div>
    }
}
