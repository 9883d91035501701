use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{AmountInput, DateInput, Notice};
use crate::amount::AmountFieldState;
use crate::app::AppContext;
use crate::date_input::DateFieldState;
use crate::form::{GiftForm, EVENT_TYPES};
use crate::models::TransactionType;

#[derive(Properties, PartialEq)]
pub struct GiftFormModalProps {
    pub form: GiftForm,
    pub on_close: Callback<()>,
    pub on_saved: Callback<()>,
}

fn text_input(value: &str, placeholder: &'static str, on_value: Callback<String>) -> Html {
    html! {
        <input
            type="text"
            placeholder={placeholder}
            value={value.to_string()}
            oninput={Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_value.emit(input.value());
            })}
            class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none"
        />
    }
}

fn field(label: &'static str, control: Html) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
            { control }
        </div>
    }
}

#[function_component(GiftFormModal)]
pub fn gift_form_modal(props: &GiftFormModalProps) -> Html {
    let ctx = use_context::<AppContext>();
    let form = use_state(|| props.form.clone());
    let date_is_future = use_state(|| props.form.is_future_on(Local::now().date_naive()));
    let saving = use_state(|| false);

    let Some(ctx) = ctx else {
        return html! {};
    };

    // Each setter copies the current form, changes one field and stores it.
    let update = {
        let form = form.clone();
        move |apply: fn(&mut GiftForm, String)| {
            let form = form.clone();
            Callback::from(move |value: String| {
                let mut next = (*form).clone();
                apply(&mut next, value);
                form.set(next);
            })
        }
    };

    let on_date = {
        let form = form.clone();
        let date_is_future = date_is_future.clone();
        Callback::from(move |state: DateFieldState| {
            let mut next = (*form).clone();
            next.event_date = state.canonical_value.clone();
            form.set(next);
            date_is_future.set(state.is_future);
        })
    };

    let on_amount = {
        let form = form.clone();
        Callback::from(move |amount: AmountFieldState| {
            let mut next = (*form).clone();
            next.amount = amount;
            form.set(next);
        })
    };

    let on_event_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.event_type = select.value();
            form.set(next);
        })
    };

    let on_transaction_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(kind) = TransactionType::from_param(&select.value()) {
                let mut next = (*form).clone();
                next.transaction_type = kind;
                form.set(next);
            }
        })
    };

    let on_memo = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.memo = area.value();
            form.set(next);
        })
    };

    let on_invalid_date = ctx.notify.reform(|message: String| Notice::warning(message));

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let date_is_future = date_is_future.clone();
        let ctx = ctx.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let request = match form.to_request() {
                Ok(request) => request,
                Err(err) => {
                    ctx.notify.emit(Notice::error(err.to_string()));
                    return;
                }
            };
            if *date_is_future {
                ctx.notify
                    .emit(Notice::warning("The event date is in the future."));
            }

            saving.set(true);
            let id = form.id;
            let client = ctx.client();
            let ctx = ctx.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => client.update_gift(id, &request).await,
                    None => client.create_gift(&request).await,
                };
                saving.set(false);
                match result {
                    Ok(_) => {
                        ctx.notify.emit(Notice::success(if id.is_some() {
                            "Record updated."
                        } else {
                            "Record added."
                        }));
                        on_saved.emit(());
                    }
                    Err(err) => ctx.report(err, "Could not save the record."),
                }
            });
        })
    };

    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let title = if form.is_edit() { "Edit Record" } else { "Add Record" };

    html! {
        <div class="fixed inset-0 z-40 bg-black/40 flex items-center justify-center p-4">
            <form class="w-full max-w-2xl bg-white rounded-[10px] shadow-lg p-6 space-y-4" onsubmit={on_submit}>
                <div class="flex items-center justify-between">
                    <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{ title }</h4>
                    <button type="button" class="text-muted-foreground" onclick={on_close.clone()}>{"×"}</button>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                    { field("Event date", html! {
                        <DateInput
                            id="eventDate"
                            initial={props.form.event_date.clone()}
                            on_change={on_date}
                            on_invalid={on_invalid_date}
                        />
                    }) }
                    { field("Event type", html! {
                        <select onchange={on_event_type} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] border-none">
                            { for EVENT_TYPES.iter().map(|(stored, label)| html! {
                                <option value={*stored} selected={form.event_type == *stored}>{ *label }</option>
                            }) }
                            if !EVENT_TYPES.iter().any(|(stored, _)| form.event_type == *stored) {
                                <option value={form.event_type.clone()} selected=true>{ form.event_type.clone() }</option>
                            }
                        </select>
                    }) }
                    { field("Transaction type", html! {
                        <select onchange={on_transaction_type} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] border-none">
                            { for [TransactionType::Received, TransactionType::Sent].into_iter().map(|kind| html! {
                                <option value={kind.as_param()} selected={form.transaction_type == kind}>{ kind.label() }</option>
                            }) }
                        </select>
                    }) }
                    { field("Name", text_input(&form.name, "Who gave or received", update(|f, v| f.name = v))) }
                    { field("Relation", text_input(&form.relation, "Friend, coworker, ...", update(|f, v| f.relation = v))) }
                    { field("Amount", html! {
                        <AmountInput id="amount" value={form.amount.clone()} on_change={on_amount} />
                    }) }
                    { field("Contact", text_input(&form.contact, "010-1234-5678", update(|f, v| f.contact = v))) }
                </div>

                { field("Memo", html! {
                    <textarea
                        rows="3"
                        value={form.memo.clone()}
                        oninput={on_memo}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none"
                    />
                }) }

                <div class="flex gap-3">
                    <button type="submit" class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[12px] font-bold" disabled={*saving}>
                        { if *saving { "Saving..." } else { "Save" } }
                    </button>
                    <button type="button" onclick={on_close} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[12px] font-bold">{"Cancel"}</button>
                </div>
            </form>
        </div>
    }
}
