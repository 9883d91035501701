use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads a money value sent as a JSON number (possibly fractional) or a
/// numeric string as whole won. `null` reads as zero.
fn de_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.trunc() as i64)
            .map_err(|_| D::Error::custom(format!("invalid amount: {s}"))),
        other => Err(D::Error::custom(format!("invalid amount: {other}"))),
    }
}

/// `null` reads as an empty list.
fn de_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[default]
    Received,
    Sent,
}

impl TransactionType {
    pub fn as_param(self) -> &'static str {
        match self {
            TransactionType::Received => "RECEIVED",
            TransactionType::Sent => "SENT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Received => "Received",
            TransactionType::Sent => "Sent",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "RECEIVED" => Some(TransactionType::Received),
            "SENT" => Some(TransactionType::Sent),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftMoney {
    pub id: i64,
    pub event_date: NaiveDate,
    pub event_type: String,
    #[serde(default)]
    pub transaction_type: TransactionType,
    pub giver_name: String,
    #[serde(default)]
    pub giver_relation: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Body of create and update calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftMoneyRequest {
    pub event_date: NaiveDate,
    pub event_type: String,
    pub transaction_type: TransactionType,
    pub name: String,
    pub relation: String,
    pub amount: u64,
    pub contact: String,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftMoneySummary {
    #[serde(deserialize_with = "de_amount")]
    pub received_total_amount: i64,
    pub received_count: u64,
    #[serde(deserialize_with = "de_amount")]
    pub sent_total_amount: i64,
    pub sent_count: u64,
    #[serde(deserialize_with = "de_amount")]
    pub total_amount: i64,
    pub total_count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStatistics {
    pub year: i32,
    #[serde(default, deserialize_with = "de_amount")]
    pub received_total: i64,
    #[serde(default)]
    pub received_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub sent_total: i64,
    #[serde(default)]
    pub sent_count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    pub year: i32,
    pub month: u32,
    #[serde(default, deserialize_with = "de_amount")]
    pub received_total: i64,
    #[serde(default)]
    pub received_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub sent_total: i64,
    #[serde(default)]
    pub sent_count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStatistics {
    #[serde(alias = "giverName")]
    pub name: String,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub received_total: i64,
    #[serde(default)]
    pub received_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub sent_total: i64,
    #[serde(default)]
    pub sent_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub balance: i64,
    #[serde(default)]
    pub last_event_date: Option<String>,
    #[serde(default)]
    pub last_event_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeStatistics {
    pub event_type: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub received_total: i64,
    #[serde(default)]
    pub received_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub sent_total: i64,
    #[serde(default)]
    pub sent_count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationStatistics {
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub received_total: i64,
    #[serde(default)]
    pub received_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub sent_total: i64,
    #[serde(default)]
    pub sent_count: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub average_received: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub average_sent: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Result of a spreadsheet import.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadResponse {
    pub success_count: u32,
    pub fail_count: u32,
    #[serde(deserialize_with = "de_list")]
    pub errors: Vec<UploadRowError>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadRowError {
    pub row: u32,
    pub reason: String,
}

impl UploadResponse {
    pub fn summary(&self) -> String {
        format!(
            "Upload finished. Succeeded: {}, failed: {}.",
            self.success_count, self.fail_count
        )
    }
}

/// Error body returned by the backend.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub errors: Option<std::collections::BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gift_record_reads_backend_shape() {
        let raw = r#"{
            "id": 7,
            "eventDate": "2024-05-18",
            "eventType": "Wedding",
            "transactionType": "SENT",
            "giverName": "Kim",
            "giverRelation": null,
            "amount": 100000.00,
            "contact": "010-1234-5678",
            "memo": null,
            "createdAt": "2024-05-18T10:00:00"
        }"#;
        let gift: GiftMoney = serde_json::from_str(raw).unwrap();
        assert_eq!(gift.id, 7);
        assert_eq!(gift.event_date, NaiveDate::from_ymd_opt(2024, 5, 18).unwrap());
        assert_eq!(gift.transaction_type, TransactionType::Sent);
        assert_eq!(gift.amount, 100000);
        assert_eq!(gift.giver_relation, None);
    }

    #[test]
    fn amounts_accept_strings_and_nulls() {
        let raw = r#"{"receivedTotalAmount": "250000", "receivedCount": 3,
                      "sentTotalAmount": null, "sentCount": 0,
                      "totalAmount": 250000.5, "totalCount": 3}"#;
        let summary: GiftMoneySummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.received_total_amount, 250000);
        assert_eq!(summary.sent_total_amount, 0);
        assert_eq!(summary.total_amount, 250000);
    }

    #[test]
    fn person_name_accepts_either_key() {
        let a: PersonStatistics = serde_json::from_str(r#"{"giverName": "Lee"}"#).unwrap();
        let b: PersonStatistics = serde_json::from_str(r#"{"name": "Lee"}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn upload_result_reads_counts_and_rows() {
        let raw = r#"{"successCount": 12, "failCount": 2,
                      "errors": [{"row": 4, "reason": "invalid date"}, {"row": 9, "reason": "amount missing"}]}"#;
        let result: UploadResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(result.success_count, 12);
        assert_eq!(result.fail_count, 2);
        assert_eq!(
            result.errors[1],
            UploadRowError {
                row: 9,
                reason: "amount missing".to_string()
            }
        );
        assert_eq!(result.summary(), "Upload finished. Succeeded: 12, failed: 2.");

        let null_rows: UploadResponse =
            serde_json::from_str(r#"{"successCount": 3, "failCount": 0, "errors": null}"#)
                .unwrap();
        assert_eq!(null_rows.success_count, 3);
        assert!(null_rows.errors.is_empty());
        let without_rows: UploadResponse =
            serde_json::from_str(r#"{"successCount": 3, "failCount": 0}"#).unwrap();
        assert!(without_rows.errors.is_empty());
    }

    #[test]
    fn request_uses_backend_field_names() {
        let req = GiftMoneyRequest {
            event_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            event_type: "Funeral".to_string(),
            transaction_type: TransactionType::Received,
            name: "Park".to_string(),
            relation: String::new(),
            amount: 50000,
            contact: String::new(),
            memo: String::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["eventDate"], "2024-01-02");
        assert_eq!(json["transactionType"], "RECEIVED");
        assert_eq!(json["name"], "Park");
        assert_eq!(json["amount"], 50000);
    }
}
