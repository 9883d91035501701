use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::amount::AmountFieldState;
use crate::error::FormError;
use crate::models::{GiftMoney, GiftMoneyRequest, TransactionType};

/// Event types as the backend stores them, with their display labels.
pub const EVENT_TYPES: [(&str, &str); 5] = [
    ("결혼식", "Wedding"),
    ("장례식", "Funeral"),
    ("돌잔치", "First birthday"),
    ("개업", "Opening"),
    ("기타", "Other"),
];

/// Display label for a stored event type. Unknown values show as stored.
pub fn event_type_label(value: &str) -> &str {
    EVENT_TYPES
        .iter()
        .find(|(stored, _)| *stored == value)
        .map_or(value, |(_, label)| *label)
}

const MAX_EVENT_TYPE: usize = 50;
const MAX_NAME: usize = 100;
const MAX_RELATION: usize = 50;

fn contact_pattern() -> &'static Regex {
    static CONTACT: OnceLock<Regex> = OnceLock::new();
    CONTACT.get_or_init(|| Regex::new(r"^\d{2,3}-\d{3,4}-\d{4}$").expect("contact pattern compiles"))
}

/// Add/edit form values. Date and amount hold the canonical outputs of
/// their masking inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct GiftForm {
    pub id: Option<i64>,
    pub event_date: String,
    pub event_type: String,
    pub transaction_type: TransactionType,
    pub name: String,
    pub relation: String,
    pub amount: AmountFieldState,
    pub contact: String,
    pub memo: String,
}

impl GiftForm {
    /// Blank form for add mode.
    pub fn blank(today: NaiveDate, transaction_type: TransactionType) -> Self {
        Self {
            id: None,
            event_date: today.format("%Y-%m-%d").to_string(),
            event_type: EVENT_TYPES[0].0.to_string(),
            transaction_type,
            name: String::new(),
            relation: String::new(),
            amount: AmountFieldState::default(),
            contact: String::new(),
            memo: String::new(),
        }
    }

    pub fn from_record(gift: &GiftMoney) -> Self {
        Self {
            id: Some(gift.id),
            event_date: gift.event_date.format("%Y-%m-%d").to_string(),
            event_type: gift.event_type.clone(),
            transaction_type: gift.transaction_type,
            name: gift.giver_name.clone(),
            relation: gift.giver_relation.clone().unwrap_or_default(),
            amount: AmountFieldState::from_amount(gift.amount),
            contact: gift.contact.clone().unwrap_or_default(),
            memo: gift.memo.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the stored event date lies after `today`. Used to seed the
    /// future-date advisory before the date field reports anything.
    pub fn is_future_on(&self, today: NaiveDate) -> bool {
        NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d").is_ok_and(|date| date > today)
    }

    pub fn to_request(&self) -> Result<GiftMoneyRequest, FormError> {
        if self.event_date.is_empty() {
            return Err(FormError::Required("Event date"));
        }
        let event_date = NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;

        let event_type = required("Event type", &self.event_type, MAX_EVENT_TYPE)?;
        let name = required("Name", &self.name, MAX_NAME)?;
        let relation = self.relation.trim();
        if relation.chars().count() > MAX_RELATION {
            return Err(FormError::TooLong {
                field: "Relation",
                max: MAX_RELATION,
            });
        }

        if self.amount.is_empty() {
            return Err(FormError::Required("Amount"));
        }
        let amount = match self.amount.amount() {
            Some(amount) if amount > 0 => amount,
            _ => return Err(FormError::InvalidAmount),
        };

        let contact = self.contact.trim();
        if !contact.is_empty() && !contact_pattern().is_match(contact) {
            return Err(FormError::InvalidContact);
        }

        Ok(GiftMoneyRequest {
            event_date,
            event_type,
            transaction_type: self.transaction_type,
            name,
            relation: relation.to_string(),
            amount,
            contact: contact.to_string(),
            memo: self.memo.trim().to_string(),
        })
    }
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount;
    use pretty_assertions::assert_eq;

    fn filled() -> GiftForm {
        GiftForm {
            name: " Kim Minsu ".to_string(),
            relation: "Coworker".to_string(),
            amount: amount::on_input("100,000"),
            contact: "010-1234-5678".to_string(),
            ..GiftForm::blank(
                NaiveDate::from_ymd_opt(2024, 5, 18).unwrap(),
                TransactionType::Sent,
            )
        }
    }

    #[test]
    fn valid_form_builds_request() {
        let req = filled().to_request().unwrap();
        assert_eq!(req.event_date, NaiveDate::from_ymd_opt(2024, 5, 18).unwrap());
        assert_eq!(req.event_type, "결혼식");
        assert_eq!(req.transaction_type, TransactionType::Sent);
        assert_eq!(req.name, "Kim Minsu");
        assert_eq!(req.amount, 100000);
    }

    #[test]
    fn missing_fields_are_reported() {
        let form = GiftForm {
            event_date: String::new(),
            ..filled()
        };
        assert_eq!(form.to_request(), Err(FormError::Required("Event date")));

        let form = GiftForm {
            name: "   ".to_string(),
            ..filled()
        };
        assert_eq!(form.to_request(), Err(FormError::Required("Name")));

        let form = GiftForm {
            amount: AmountFieldState::default(),
            ..filled()
        };
        assert_eq!(form.to_request(), Err(FormError::Required("Amount")));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let form = GiftForm {
            amount: amount::on_input("000"),
            ..filled()
        };
        assert_eq!(form.to_request(), Err(FormError::InvalidAmount));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let form = GiftForm {
            event_date: "2023-02-30".to_string(),
            ..filled()
        };
        assert_eq!(form.to_request(), Err(FormError::InvalidDate));
    }

    #[test]
    fn contact_format() {
        for ok in ["", "02-123-4567", "010-1234-5678"] {
            let form = GiftForm {
                contact: ok.to_string(),
                ..filled()
            };
            assert!(form.to_request().is_ok(), "{ok}");
        }
        for bad in ["01012345678", "010-12-5678", "phone"] {
            let form = GiftForm {
                contact: bad.to_string(),
                ..filled()
            };
            assert_eq!(form.to_request(), Err(FormError::InvalidContact), "{bad}");
        }
    }

    #[test]
    fn length_limits_count_characters() {
        let form = GiftForm {
            name: "김".repeat(100),
            ..filled()
        };
        assert!(form.to_request().is_ok());
        let form = GiftForm {
            relation: "x".repeat(51),
            ..filled()
        };
        assert_eq!(
            form.to_request(),
            Err(FormError::TooLong {
                field: "Relation",
                max: 50
            })
        );
    }

    #[test]
    fn edit_mode_round_trips_a_record() {
        let gift: GiftMoney = serde_json::from_value(serde_json::json!({
            "id": 3,
            "eventDate": "2023-11-04",
            "eventType": "장례식",
            "transactionType": "RECEIVED",
            "giverName": "Choi",
            "amount": 30000
        }))
        .unwrap();
        let form = GiftForm::from_record(&gift);
        assert!(form.is_edit());
        assert_eq!(form.event_date, "2023-11-04");
        assert_eq!(form.amount.display_value, "30,000");
        assert_eq!(form.to_request().unwrap().amount, 30000);
        assert_eq!(form.to_request().unwrap().event_type, "장례식");
    }

    #[test]
    fn event_types_keep_stored_values() {
        assert_eq!(event_type_label("결혼식"), "Wedding");
        assert_eq!(event_type_label("돌잔치"), "First birthday");
        assert_eq!(event_type_label("회갑연"), "회갑연");
    }

    #[test]
    fn future_flag_comes_from_the_stored_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let form = GiftForm {
            event_date: "2026-12-24".to_string(),
            ..filled()
        };
        assert!(form.is_future_on(today));

        let form = GiftForm {
            event_date: "2026-10-16".to_string(),
            ..filled()
        };
        assert!(!form.is_future_on(today));

        let form = GiftForm {
            event_date: String::new(),
            ..filled()
        };
        assert!(!form.is_future_on(today));
    }
}
