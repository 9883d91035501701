use crate::models::{EventTypeStatistics, GiftMoneySummary, MonthlyStatistics, PersonStatistics};

pub const TOP_PERSONS: usize = 5;
pub const MAX_PERSON_ROWS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(value: i64) -> Self {
        match value.signum() {
            1 => Tone::Positive,
            -1 => Tone::Negative,
            _ => Tone::Neutral,
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Tone::Positive => "text-green-600",
            Tone::Negative => "text-red-600",
            Tone::Neutral => "text-foreground",
        }
    }
}

/// Received minus sent.
pub fn difference(summary: &GiftMoneySummary) -> i64 {
    summary
        .received_total_amount
        .saturating_sub(summary.sent_total_amount)
}

pub fn top_persons(persons: &[PersonStatistics]) -> &[PersonStatistics] {
    &persons[..persons.len().min(TOP_PERSONS)]
}

/// Rows shown in the person table and how many were left out.
pub fn person_rows(persons: &[PersonStatistics]) -> (&[PersonStatistics], usize) {
    let shown = persons.len().min(MAX_PERSON_ROWS);
    (&persons[..shown], persons.len() - shown)
}

/// Monthly rows arrive newest first; tables read oldest first.
pub fn chronological(mut months: Vec<MonthlyStatistics>) -> Vec<MonthlyStatistics> {
    months.reverse();
    months
}

pub fn month_label(row: &MonthlyStatistics) -> String {
    format!("{}.{:02}", row.year, row.month)
}

pub fn event_type_total(row: &EventTypeStatistics) -> i64 {
    row.received_total.saturating_add(row.sent_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> PersonStatistics {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    fn month(year: i32, month: u32) -> MonthlyStatistics {
        serde_json::from_value(serde_json::json!({ "year": year, "month": month })).unwrap()
    }

    #[test]
    fn difference_and_tone() {
        let summary = GiftMoneySummary {
            received_total_amount: 300000,
            sent_total_amount: 450000,
            ..GiftMoneySummary::default()
        };
        assert_eq!(difference(&summary), -150000);
        assert_eq!(Tone::of(difference(&summary)), Tone::Negative);
        assert_eq!(Tone::of(0), Tone::Neutral);
        assert_eq!(Tone::of(1), Tone::Positive);
    }

    #[test]
    fn person_table_is_capped() {
        let persons = (0..503).map(|i| person(&i.to_string())).collect::<Vec<_>>();
        let (rows, hidden) = person_rows(&persons);
        assert_eq!(rows.len(), MAX_PERSON_ROWS);
        assert_eq!(hidden, 3);
        assert_eq!(top_persons(&persons).len(), TOP_PERSONS);

        let few = vec![person("a"), person("b")];
        assert_eq!(person_rows(&few).1, 0);
        assert_eq!(top_persons(&few).len(), 2);
    }

    #[test]
    fn months_read_oldest_first() {
        let rows = chronological(vec![month(2025, 2), month(2025, 1), month(2024, 12)]);
        let labels = rows.iter().map(month_label).collect::<Vec<_>>();
        assert_eq!(labels, ["2024.12", "2025.01", "2025.02"]);
    }
}
