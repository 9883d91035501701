use tracing::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::clipboard_text;
use crate::date_input::{DateFieldState, DateSegmentInput, KeyAction, Modifiers, ValidationResult};

#[derive(Properties, PartialEq)]
pub struct DateInputProps {
    /// `YYYY-MM-DD` the field starts from; empty starts blank.
    pub initial: AttrValue,
    pub on_change: Callback<DateFieldState>,
    /// Receives the message when a typed date fails the calendar check.
    pub on_invalid: Callback<String>,
    #[prop_or_default]
    pub id: AttrValue,
    #[prop_or(AttrValue::from("eventDate"))]
    pub name: AttrValue,
}

fn publish(
    input: Option<&HtmlInputElement>,
    state: DateFieldState,
    snapshot: &UseStateHandle<DateFieldState>,
    on_change: &Callback<DateFieldState>,
) {
    if let Some(input) = input {
        input.set_value(&state.display_value());
    }
    snapshot.set(state.clone());
    on_change.emit(state);
}

/// `YYYY.MM.DD` entry with a native picker next to it.
#[function_component(DateInput)]
pub fn date_input(props: &DateInputProps) -> Html {
    let field = use_mut_ref(DateSegmentInput::default);
    let snapshot = use_state(DateFieldState::default);

    {
        let field = field.clone();
        let snapshot = snapshot.clone();
        use_effect_with_deps(
            move |initial: &AttrValue| {
                let mut field = field.borrow_mut();
                if initial.is_empty() {
                    field.reset();
                } else if let Err(err) = field.on_calendar_pick(initial) {
                    warn!(%err, "could not seed date field");
                    field.reset();
                }
                snapshot.set(field.state().clone());
                || ()
            },
            props.initial.clone(),
        );
    }

    let oninput = {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let state = field.borrow_mut().on_input(&input.value()).clone();
            publish(Some(&input), state, &snapshot, &on_change);
        })
    };

    let onkeydown = {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: KeyboardEvent| {
            let modifiers = Modifiers {
                ctrl: e.ctrl_key(),
                meta: e.meta_key(),
            };
            let action = field.borrow_mut().on_keydown(&e.key(), modifiers);
            match action {
                KeyAction::PassThrough => {}
                KeyAction::Suppress => e.prevent_default(),
                KeyAction::Replace => {
                    e.prevent_default();
                    let input: HtmlInputElement = e.target_unchecked_into();
                    let state = field.borrow().state().clone();
                    publish(Some(&input), state, &snapshot, &on_change);
                }
            }
        })
    };

    let onpaste = {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            e.prevent_default();
            let text = clipboard_text(&e).unwrap_or_default();
            let state = field.borrow_mut().on_paste(&text).clone();
            let input: HtmlInputElement = e.target_unchecked_into();
            publish(Some(&input), state, &snapshot, &on_change);
        })
    };

    let onblur = {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let on_change = props.on_change.clone();
        let on_invalid = props.on_invalid.clone();
        Callback::from(move |e: FocusEvent| {
            let checked = ValidationResult::from(&field.borrow_mut().on_blur().map(|_| ()));
            if !checked.valid {
                let input: HtmlInputElement = e.target_unchecked_into();
                let state = field.borrow().state().clone();
                publish(Some(&input), state, &snapshot, &on_change);
                on_invalid.emit(checked.message.unwrap_or_default());
            }
        })
    };

    let on_pick = {
        let field = field.clone();
        let snapshot = snapshot.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let picker: HtmlInputElement = e.target_unchecked_into();
            let result = field
                .borrow_mut()
                .on_calendar_pick(&picker.value())
                .map(|state| state.clone());
            match result {
                Ok(state) => publish(None, state, &snapshot, &on_change),
                Err(err) => warn!(%err, "ignored calendar pick"),
            }
        })
    };

    html! {
        <div class="space-y-1">
            <div class="flex gap-2">
                <input
                    type="text"
                    inputmode="numeric"
                    autocomplete="off"
                    id={props.id.clone()}
                    placeholder="YYYY.MM.DD"
                    value={snapshot.display_value()}
                    {oninput}
                    {onkeydown}
                    {onpaste}
                    {onblur}
                    class="flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none tracking-wider"
                />
                <input
                    type="date"
                    aria-label="Pick a date"
                    value={snapshot.canonical_value.clone()}
                    onchange={on_pick}
                    class="w-10 bg-[#f1f4f9] rounded-[10px] px-2 py-2 text-[11px] border-none"
                />
            </div>
            <input type="hidden" name={props.name.clone()} value={snapshot.canonical_value.clone()} />
            if snapshot.is_future {
                <p class="text-[11px] text-yellow-700">{"This date is in the future."}</p>
            }
        </div>
    }
}
