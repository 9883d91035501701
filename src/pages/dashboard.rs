use chrono::Local;
use gloo_timers::callback::Timeout;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::AppContext;
use crate::components::layout::{icon_arrow_down, icon_arrow_up, icon_plus, page_shell, StatCard};
use crate::components::{GiftFormModal, Notice, UploadModal};
use crate::form::{event_type_label, GiftForm};
use crate::format::format_won;
use crate::models::{GiftMoney, GiftMoneySummary, Page, TransactionType};
use crate::session::{page_links, PageLink, Revision, ViewAction, ViewState};
use crate::stats::{difference, Tone};

const SEARCH_DEBOUNCE_MILLIS: u32 = 500;

fn or_dash(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let ctx = use_context::<AppContext>();
    let page_size = ctx.as_ref().map(|c| c.config.page_size).unwrap_or(10);

    let view = use_reducer(|| ViewState::new(page_size));
    let gifts = use_state(|| None::<Page<GiftMoney>>);
    let summary = use_state(|| None::<GiftMoneySummary>);
    let revision = use_reducer(Revision::default);
    let editing = use_state(|| None::<GiftForm>);
    let importing = use_state(|| false);
    let search_timer = use_mut_ref(|| None::<Timeout>);

    {
        let ctx = ctx.clone();
        let gifts = gifts.clone();
        use_effect_with_deps(
            move |(view, _): &(ViewState, u32)| {
                if let Some(ctx) = ctx {
                    let view = view.clone();
                    spawn_local(async move {
                        match ctx.client().list_gifts(&view).await {
                            Ok(page) => gifts.set(Some(page)),
                            Err(err) => ctx.report(err, "Could not load records."),
                        }
                    });
                }
                || ()
            },
            ((*view).clone(), revision.0),
        );
    }

    {
        let ctx = ctx.clone();
        let summary = summary.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(ctx) = ctx {
                    spawn_local(async move {
                        match ctx.client().summary().await {
                            Ok(stats) => summary.set(Some(stats)),
                            // The list loader already reports; the cards just stay empty.
                            Err(err) if err.is_unauthorized() => ctx.on_unauthorized.emit(()),
                            Err(err) => debug!(%err, "summary unavailable"),
                        }
                    });
                }
                || ()
            },
            revision.0,
        );
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_search_input = {
        let view = view.clone();
        let search_timer = search_timer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let keyword = input.value();
            let view = view.clone();
            let timeout = Timeout::new(SEARCH_DEBOUNCE_MILLIS, move || {
                view.dispatch(ViewAction::Search(keyword));
            });
            *search_timer.borrow_mut() = Some(timeout);
        })
    };

    let on_search_key = {
        let view = view.clone();
        let search_timer = search_timer.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                search_timer.borrow_mut().take();
                let input: HtmlInputElement = e.target_unchecked_into();
                view.dispatch(ViewAction::Search(input.value()));
            }
        })
    };

    let on_tab = {
        let view = view.clone();
        move |kind: TransactionType| {
            let view = view.clone();
            Callback::from(move |_: MouseEvent| view.dispatch(ViewAction::FilterByType(kind)))
        }
    };

    let on_add = {
        let editing = editing.clone();
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            let today = Local::now().date_naive();
            editing.set(Some(GiftForm::blank(today, view.transaction_type)));
        })
    };

    let on_edit = {
        let editing = editing.clone();
        let ctx = ctx.clone();
        move |id: i64| {
            let editing = editing.clone();
            let ctx = ctx.clone();
            Callback::from(move |_: MouseEvent| {
                let editing = editing.clone();
                let ctx = ctx.clone();
                spawn_local(async move {
                    match ctx.client().get_gift(id).await {
                        Ok(gift) => editing.set(Some(GiftForm::from_record(&gift))),
                        Err(err) => ctx.report(err, "Could not load the record."),
                    }
                });
            })
        }
    };

    let on_delete = {
        let ctx = ctx.clone();
        let revision = revision.clone();
        move |id: i64| {
            let ctx = ctx.clone();
            let revision = revision.clone();
            Callback::from(move |_: MouseEvent| {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Delete this record?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                let ctx = ctx.clone();
                let revision = revision.clone();
                spawn_local(async move {
                    match ctx.client().delete_gift(id).await {
                        Ok(()) => {
                            ctx.notify.emit(Notice::success("Record deleted."));
                            revision.dispatch(());
                        }
                        Err(err) => ctx.report(err, "Could not delete the record."),
                    }
                });
            })
        }
    };

    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_saved = {
        let editing = editing.clone();
        let revision = revision.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
            revision.dispatch(());
        })
    };

    let on_import = {
        let importing = importing.clone();
        Callback::from(move |_: MouseEvent| importing.set(true))
    };

    let on_import_close = {
        let importing = importing.clone();
        Callback::from(move |_: ()| importing.set(false))
    };

    let on_imported = {
        let revision = revision.clone();
        Callback::from(move |_: ()| revision.dispatch(()))
    };

    let on_page = {
        let view = view.clone();
        move |page: u32| {
            let view = view.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                view.dispatch(ViewAction::GoTo(page));
            })
        }
    };

    let cards = match &*summary {
        Some(stats) => {
            let diff = difference(stats);
            html! {
                <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                    <StatCard title="Received" amount={stats.received_total_amount} count={Some(stats.received_count)} tone={Tone::Positive} />
                    <StatCard title="Sent" amount={stats.sent_total_amount} count={Some(stats.sent_count)} tone={Tone::Negative} />
                    <StatCard title="Difference" amount={diff} tone={Tone::of(diff)} />
                    <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
                        <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{"Total records"}</p>
                        <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ stats.total_count }</h3>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    let tab = |kind: TransactionType| {
        let active = view.transaction_type == kind;
        let class_name = if active {
            "px-4 py-2 rounded-[10px] text-[12px] font-bold bg-[#173E63] text-white"
        } else {
            "px-4 py-2 rounded-[10px] text-[12px] font-bold bg-[#f1f4f9] text-[#173E63]"
        };
        html! {
            <button type="button" class={class_name} onclick={on_tab(kind)}>{ kind.label() }</button>
        }
    };

    let rows = match &*gifts {
        None => html! {
            <tr><td colspan="9" class="px-6 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr>
        },
        Some(page) if page.content.is_empty() => html! {
            <tr><td colspan="9" class="px-6 py-6 text-center text-muted-foreground">{"No records yet."}</td></tr>
        },
        Some(page) => html! {
            <>
            { for page.content.iter().map(|item| {
                let received = item.transaction_type == TransactionType::Received;
                let badge = if received {
                    "bg-green-100 text-green-700"
                } else {
                    "bg-red-100 text-red-700"
                };
                html! {
                    <tr key={item.id} class="text-sm hover:bg-muted/40 transition-colors">
                        <td class="px-6 py-3">
                            <span class={classes!("inline-flex", "items-center", "gap-1", "px-2", "py-1", "rounded-md", "text-[10px]", "font-bold", badge)}>
                                { if received { icon_arrow_down() } else { icon_arrow_up() } }
                                { item.transaction_type.label() }
                            </span>
                        </td>
                        <td class="px-6 py-3 text-muted-foreground">{ item.event_date.format("%Y.%m.%d").to_string() }</td>
                        <td class="px-6 py-3">{ event_type_label(&item.event_type).to_string() }</td>
                        <td class="px-6 py-3 text-foreground">{ item.giver_name.clone() }</td>
                        <td class="px-6 py-3">{ or_dash(&item.giver_relation) }</td>
                        <td class="px-6 py-3 text-right font-semibold">{ format_won(item.amount) }</td>
                        <td class="px-6 py-3">{ or_dash(&item.contact) }</td>
                        <td class="px-6 py-3">{ or_dash(&item.memo) }</td>
                        <td class="px-6 py-3 flex gap-2">
                            <button type="button" class="text-[11px] font-bold text-[#1D617A]" onclick={on_edit(item.id)}>{"Edit"}</button>
                            <button type="button" class="text-[11px] font-bold text-red-600" onclick={on_delete(item.id)}>{"Delete"}</button>
                        </td>
                    </tr>
                }
            }) }
            </>
        },
    };

    let pagination = match &*gifts {
        Some(page) => html! {
            <nav class="flex justify-center gap-1 py-4">
                { for page_links(view.page, page.total_pages).into_iter().map(|link| {
                    let (label, target, active) = match link {
                        PageLink::Previous(target) => ("Prev".to_string(), target, false),
                        PageLink::Page { index, active } => ((index + 1).to_string(), index, active),
                        PageLink::Next(target) => ("Next".to_string(), target, false),
                    };
                    let class_name = if active {
                        "px-3 py-1 rounded-md text-[12px] bg-[#173E63] text-white"
                    } else {
                        "px-3 py-1 rounded-md text-[12px] bg-[#f1f4f9] text-[#173E63]"
                    };
                    html! {
                        <a href="#" class={class_name} onclick={on_page(target)}>{ label }</a>
                    }
                }) }
            </nav>
        },
        None => html! {},
    };

    let actions = html! {
        <div class="flex gap-2">
            <button onclick={on_import} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-[12px] font-bold">
                {"Import Excel"}
            </button>
            <button onclick={on_add} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">
                { icon_plus() }
                {"Add Record"}
            </button>
        </div>
    };

    html! {
        <>
            { page_shell(
                "Gift Ledger",
                actions,
                html! {
                    <>
                        { cards }
                        <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                            <div class="p-5 border-b border-border flex flex-col md:flex-row gap-3 md:items-center md:justify-between">
                                <div class="flex gap-2">
                                    { tab(TransactionType::Received) }
                                    { tab(TransactionType::Sent) }
                                </div>
                                <input
                                    type="search"
                                    placeholder="Search name, relation, memo"
                                    oninput={on_search_input}
                                    onkeydown={on_search_key}
                                    class="w-full md:w-72 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[12px] border-none"
                                />
                            </div>
                            <div class="overflow-x-auto">
                                <table class="w-full text-left border-collapse">
                                    <thead>
                                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                            <th class="px-6 py-4 font-bold">{"Type"}</th>
                                            <th class="px-6 py-4 font-bold">{"Date"}</th>
                                            <th class="px-6 py-4 font-bold">{"Event"}</th>
                                            <th class="px-6 py-4 font-bold">{"Name"}</th>
                                            <th class="px-6 py-4 font-bold">{"Relation"}</th>
                                            <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                            <th class="px-6 py-4 font-bold">{"Contact"}</th>
                                            <th class="px-6 py-4 font-bold">{"Memo"}</th>
                                            <th class="px-6 py-4 font-bold"></th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        { rows }
                                    </tbody>
                                </table>
                            </div>
                            { pagination }
                        </div>
                    </>
                }
            ) }
            if let Some(form) = (*editing).clone() {
                <GiftFormModal {form} {on_close} {on_saved} />
            }
            if *importing {
                <UploadModal on_close={on_import_close} on_uploaded={on_imported} />
            }
        </>
    }
}
