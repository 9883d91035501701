//! Markup strings for the person statistics table.
//!
//! These rows are assembled as text and injected as inner HTML, so every
//! user-authored value goes through [`escape_html`] first.

use crate::escape::{escape_html, escape_html_opt};
use crate::format::format_won;
use crate::models::PersonStatistics;
use crate::stats::{person_rows, top_persons};

const UNSPECIFIED: &str = "Unspecified";

fn balance_badge(balance: i64) -> String {
    let class = if balance >= 0 {
        "bg-green-100 text-green-700"
    } else {
        "bg-red-100 text-red-700"
    };
    format!(
        r#"<span class="px-2 py-1 rounded-md text-[11px] font-bold {}">{}</span>"#,
        class,
        format_won(balance)
    )
}

fn relation_or_default(person: &PersonStatistics) -> String {
    match person.relation.as_deref() {
        Some(relation) if !relation.is_empty() => escape_html(relation),
        _ => UNSPECIFIED.to_string(),
    }
}

pub fn top_persons_markup(persons: &[PersonStatistics]) -> String {
    let top = top_persons(persons);
    if top.is_empty() {
        return r#"<p class="text-sm text-muted-foreground">No data yet.</p>"#.to_string();
    }
    top.iter()
        .enumerate()
        .map(|(i, person)| {
            let border = if i + 1 < top.len() { " border-b border-border" } else { "" };
            format!(
                r#"<div class="flex justify-between items-center py-2{}"><div><strong>{}</strong> <small class="text-muted-foreground">({})</small></div>{}</div>"#,
                border,
                escape_html(&person.name),
                relation_or_default(person),
                balance_badge(person.balance),
            )
        })
        .collect()
}

fn person_row(person: &PersonStatistics) -> String {
    let last_date = match person.last_event_date.as_deref() {
        Some(date) if !date.is_empty() => escape_html(date),
        _ => "-".to_string(),
    };
    format!(
        concat!(
            "<tr>",
            r#"<td class="px-4 py-2"><strong>{}</strong></td>"#,
            r#"<td class="px-4 py-2">{}</td>"#,
            r#"<td class="px-4 py-2">{} <small class="text-muted-foreground">({} times)</small></td>"#,
            r#"<td class="px-4 py-2">{} <small class="text-muted-foreground">({} times)</small></td>"#,
            r#"<td class="px-4 py-2">{}</td>"#,
            r#"<td class="px-4 py-2">{}<br><small class="text-muted-foreground">{}</small></td>"#,
            "</tr>"
        ),
        escape_html(&person.name),
        relation_or_default(person),
        format_won(person.received_total),
        person.received_count,
        format_won(person.sent_total),
        person.sent_count,
        balance_badge(person.balance),
        last_date,
        escape_html_opt(person.last_event_type.as_deref()),
    )
}

/// Full person table, capped with a notice row when rows were left out.
pub fn person_table_markup(persons: &[PersonStatistics]) -> String {
    let mut body = String::new();
    let (rows, hidden) = person_rows(persons);
    if rows.is_empty() {
        body.push_str(r#"<tr><td colspan="6" class="px-4 py-6 text-center text-muted-foreground">No data yet.</td></tr>"#);
    }
    for person in rows {
        body.push_str(&person_row(person));
    }
    if hidden > 0 {
        body.push_str(&format!(
            r#"<tr class="bg-yellow-50"><td colspan="6" class="px-4 py-3 text-center">Showing the first {} of {} people. Use search to narrow the list.</td></tr>"#,
            rows.len(),
            persons.len()
        ));
    }

    format!(
        concat!(
            r#"<table class="w-full text-left text-sm border-collapse">"#,
            r#"<thead><tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">"#,
            r#"<th class="px-4 py-3">Name</th><th class="px-4 py-3">Relation</th>"#,
            r#"<th class="px-4 py-3">Received</th><th class="px-4 py-3">Sent</th>"#,
            r#"<th class="px-4 py-3">Balance</th><th class="px-4 py-3">Last event</th>"#,
            "</tr></thead><tbody>{}</tbody></table>"
        ),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, relation: Option<&str>) -> PersonStatistics {
        serde_json::from_value(serde_json::json!({
            "giverName": name,
            "relation": relation,
            "receivedTotal": 100000,
            "receivedCount": 2,
            "sentTotal": 50000,
            "sentCount": 1,
            "balance": 50000,
            "lastEventDate": "2024-05-18",
            "lastEventType": "<b>Wedding</b>"
        }))
        .unwrap()
    }

    #[test]
    fn user_text_is_escaped() {
        let markup = person_table_markup(&[person("<script>alert(1)</script>", Some("\"friend\""))]);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(markup.contains("&quot;friend&quot;"));
        assert!(markup.contains("&lt;b&gt;Wedding&lt;/b&gt;"));
        assert!(markup.contains("50,000원"));
    }

    #[test]
    fn missing_relation_reads_unspecified() {
        let markup = top_persons_markup(&[person("Kim", None), person("Lee", Some(""))]);
        assert_eq!(markup.matches(UNSPECIFIED).count(), 2);
    }

    #[test]
    fn truncation_notice_names_the_total() {
        let persons = (0..501).map(|i| person(&i.to_string(), None)).collect::<Vec<_>>();
        let markup = person_table_markup(&persons);
        assert!(markup.contains("Showing the first 500 of 501 people."));
        assert_eq!(markup.matches("<tr>").count(), 500);
    }

    #[test]
    fn empty_table_has_placeholder_row() {
        assert!(person_table_markup(&[]).contains("No data yet."));
        assert!(top_persons_markup(&[]).contains("No data yet."));
    }
}
