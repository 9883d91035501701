use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::components::layout::page_shell;
use crate::components::raw_html;
use crate::error::ApiError;
use crate::form::event_type_label;
use crate::format::{bar_percent, format_won};
use crate::markup::{person_table_markup, top_persons_markup};
use crate::models::{
    EventTypeStatistics, MonthlyStatistics, PersonStatistics, RelationStatistics,
    YearlyStatistics,
};
use crate::stats::{chronological, event_type_total, month_label, Tone};

/// One report section's fetch state. Each section settles on its own.
#[derive(Clone, Debug, PartialEq)]
enum Section<T> {
    Loading,
    Ready(Vec<T>),
    Failed,
}

/// Fetches one report into `target`, reporting failures through the context.
fn load<T, F>(ctx: &AppContext, target: UseStateHandle<Section<T>>, what: &'static str, fetch: F)
where
    T: 'static,
    F: std::future::Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let ctx = ctx.clone();
    spawn_local(async move {
        match fetch.await {
            Ok(rows) => target.set(Section::Ready(rows)),
            Err(err) => {
                target.set(Section::Failed);
                ctx.report(err, &format!("Could not load {}.", what));
            }
        }
    });
}

fn card(title: &'static str, body: Html) -> Html {
    html! {
        <div class="bg-white rounded-[10px] shadow-sm border border-white/50 p-5">
            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider mb-4">{ title }</h4>
            { body }
        </div>
    }
}

fn section_body<T>(section: &Section<T>, render: impl FnOnce(&[T]) -> Html) -> Html {
    match section {
        Section::Loading => html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> },
        Section::Failed => html! { <p class="text-sm text-red-600">{"Could not load this report."}</p> },
        Section::Ready(rows) if rows.is_empty() => {
            html! { <p class="text-sm text-muted-foreground">{"No data yet."}</p> }
        }
        Section::Ready(rows) => render(rows),
    }
}

fn bar(value: i64, max: i64, color: &'static str) -> Html {
    let style = format!("width: {}%", bar_percent(value, max));
    html! {
        <div class="h-2 bg-[#f1f4f9] rounded-full overflow-hidden">
            <div class={classes!("h-2", "rounded-full", color)} {style}></div>
        </div>
    }
}

fn received_sent_row(label: String, received: i64, sent: i64, max: i64) -> Html {
    html! {
        <div class="space-y-1">
            <div class="flex justify-between text-[12px]">
                <span class="font-bold text-[#173E63]">{ label }</span>
                <span class="text-muted-foreground">
                    <span class="text-green-700">{ format_won(received) }</span>
                    {" / "}
                    <span class="text-red-700">{ format_won(sent) }</span>
                </span>
            </div>
            { bar(received, max, "bg-green-500") }
            { bar(sent, max, "bg-red-400") }
        </div>
    }
}

fn yearly_view(rows: &[YearlyStatistics]) -> Html {
    let max = rows
        .iter()
        .map(|r| r.received_total.max(r.sent_total))
        .max()
        .unwrap_or(0);
    html! {
        <div class="space-y-3">
            { for rows.iter().map(|r| received_sent_row(r.year.to_string(), r.received_total, r.sent_total, max)) }
        </div>
    }
}

fn monthly_view(rows: &[MonthlyStatistics]) -> Html {
    let max = rows
        .iter()
        .map(|r| r.received_total.max(r.sent_total))
        .max()
        .unwrap_or(0);
    html! {
        <div class="space-y-3">
            { for rows.iter().map(|r| received_sent_row(month_label(r), r.received_total, r.sent_total, max)) }
        </div>
    }
}

fn event_type_view(rows: &[EventTypeStatistics]) -> Html {
    let max = rows.iter().map(event_type_total).max().unwrap_or(0);
    html! {
        <div class="space-y-3">
            { for rows.iter().map(|r| {
                let total = event_type_total(r);
                html! {
                    <div class="space-y-1">
                        <div class="flex justify-between text-[12px]">
                            <span class="font-bold text-[#173E63]">{ event_type_label(&r.event_type).to_string() }</span>
                            <span class="text-muted-foreground">
                                { format!("{} ({} records)", format_won(total), r.received_count + r.sent_count) }
                            </span>
                        </div>
                        { bar(total, max, "bg-[#1D617A]") }
                    </div>
                }
            }) }
        </div>
    }
}

fn relation_view(rows: &[RelationStatistics]) -> Html {
    html! {
        <table class="w-full text-left border-collapse text-sm">
            <thead>
                <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                    <th class="px-4 py-3 font-bold">{"Relation"}</th>
                    <th class="px-4 py-3 font-bold text-right">{"Received"}</th>
                    <th class="px-4 py-3 font-bold text-right">{"Avg received"}</th>
                    <th class="px-4 py-3 font-bold text-right">{"Sent"}</th>
                    <th class="px-4 py-3 font-bold text-right">{"Avg sent"}</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-border">
                { for rows.iter().map(|r| {
                    let relation = match r.relation.as_deref() {
                        Some(text) if !text.is_empty() => text.to_string(),
                        _ => "Unspecified".to_string(),
                    };
                    let diff = r.received_total.saturating_sub(r.sent_total);
                    html! {
                        <tr>
                            <td class={classes!("px-4", "py-2", "font-bold", Tone::of(diff).text_class())}>{ relation }</td>
                            <td class="px-4 py-2 text-right">{ format!("{} ({})", format_won(r.received_total), r.received_count) }</td>
                            <td class="px-4 py-2 text-right">{ format_won(r.average_received) }</td>
                            <td class="px-4 py-2 text-right">{ format!("{} ({})", format_won(r.sent_total), r.sent_count) }</td>
                            <td class="px-4 py-2 text-right">{ format_won(r.average_sent) }</td>
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}

#[function_component(StatisticsPage)]
pub fn statistics_page() -> Html {
    let ctx = use_context::<AppContext>();
    let yearly = use_state(|| Section::<YearlyStatistics>::Loading);
    let monthly = use_state(|| Section::<MonthlyStatistics>::Loading);
    let persons = use_state(|| Section::<PersonStatistics>::Loading);
    let event_types = use_state(|| Section::<EventTypeStatistics>::Loading);
    let relations = use_state(|| Section::<RelationStatistics>::Loading);

    {
        let ctx = ctx.clone();
        let yearly = yearly.clone();
        let monthly = monthly.clone();
        let persons = persons.clone();
        let event_types = event_types.clone();
        let relations = relations.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(ctx) = ctx {
                    let client = ctx.client();
                    let months = ctx.config.monthly_window;

                    let yearly_client = client.clone();
                    load(&ctx, yearly, "yearly statistics", async move {
                        yearly_client.yearly().await
                    });
                    let monthly_client = client.clone();
                    load(&ctx, monthly, "monthly statistics", async move {
                        monthly_client.monthly(months).await.map(chronological)
                    });
                    let persons_client = client.clone();
                    load(&ctx, persons, "person statistics", async move {
                        persons_client.persons().await
                    });
                    let event_client = client.clone();
                    load(&ctx, event_types, "event statistics", async move {
                        event_client.event_types().await
                    });
                    load(&ctx, relations, "relation statistics", async move {
                        client.relations().await
                    });
                }
                || ()
            },
            (),
        );
    }

    if ctx.is_none() {
        return html! {};
    }

    let people = match &*persons {
        Section::Ready(rows) => html! {
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                { card("Top people", raw_html(&top_persons_markup(rows))) }
                <div class="lg:col-span-2">
                    { card("By person", html! {
                        <div class="overflow-x-auto max-h-[480px]">
                            { raw_html(&person_table_markup(rows)) }
                        </div>
                    }) }
                </div>
            </div>
        },
        other => card("By person", section_body(other, |_: &[PersonStatistics]| html! {})),
    };

    page_shell(
        "Statistics",
        html! {},
        html! {
            <>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                    { card("By year", section_body(&*yearly, yearly_view)) }
                    { card("Recent months", section_body(&*monthly, monthly_view)) }
                </div>
                { people }
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                    { card("By event", section_body(&*event_types, event_type_view)) }
                    { card("By relation", section_body(&*relations, relation_view)) }
                </div>
            </>
        },
    )
}
