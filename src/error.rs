use std::collections::BTreeMap;

use thiserror::Error;

/// Calendar check failures raised when a fully typed date loses focus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateValidationError {
    #[error("Month must be between 1 and 12 (entered {month:02}).")]
    MonthOutOfRange { month: u32 },
    #[error("Day must be between 1 and 31 (entered {day:02}).")]
    DayOutOfRange { day: u32 },
    #[error("{year:04}-{month:02} only has {max} days (entered {day:02}).")]
    DayExceedsMonth {
        year: i32,
        month: u32,
        day: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calendar picker value '{0}' is not a YYYY-MM-DD date")]
pub struct CalendarPickError(pub String);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no token stored")]
    MissingToken,
    #[error("no user stored")]
    MissingUser,
    #[error("stored user is not valid JSON: {0}")]
    InvalidUser(#[from] serde_json::Error),
}

/// Problems found in the gift form before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("Event date is not a valid date.")]
    InvalidDate,
    #[error("Amount must be a positive number.")]
    InvalidAmount,
    #[error("Contact must look like 010-1234-5678.")]
    InvalidContact,
}

/// Reasons a chosen spreadsheet is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Choose a file to upload.")]
    NoFile,
    #[error("The file is empty.")]
    Empty,
    #[error("Only Excel files (.xlsx, .xls) can be uploaded ({name}).")]
    NotExcel { name: String },
    #[error("Files must be 5 MB or smaller.")]
    TooLarge { bytes: u64 },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired")]
    Unauthorized,
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("browser rejected the request: {0}")]
    Browser(String),
}

/// Human label for a field name reported by the backend.
pub fn field_label(field: &str) -> &str {
    match field {
        "eventDate" => "Event date",
        "eventType" => "Event type",
        "transactionType" => "Transaction type",
        "giverName" | "name" => "Name",
        "giverRelation" | "relation" => "Relation",
        "amount" => "Amount",
        "contact" => "Contact",
        "memo" => "Memo",
        other => other,
    }
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text shown to the user; `default` covers errors with nothing better to say.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ApiError::Validation { message, errors } if errors.is_empty() => {
                if message.is_empty() {
                    default.to_string()
                } else {
                    message.clone()
                }
            }
            ApiError::Validation { errors, .. } => {
                let mut out = String::from("Input errors:");
                for (field, message) in errors {
                    out.push_str(&format!("\n• {}: {}", field_label(field), message));
                }
                out
            }
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_human_labels() {
        let mut errors = BTreeMap::new();
        errors.insert("amount".to_string(), "must be positive".to_string());
        errors.insert("eventDate".to_string(), "is required".to_string());
        let err = ApiError::Validation {
            message: "Validation failed".to_string(),
            errors,
        };
        assert_eq!(
            err.user_message("Save failed."),
            "Input errors:\n• Amount: must be positive\n• Event date: is required"
        );
    }

    #[test]
    fn server_message_falls_back_to_default() {
        let err = ApiError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Save failed."), "Save failed.");

        let err = ApiError::Server {
            status: 404,
            message: "Record not found".to_string(),
        };
        assert_eq!(err.user_message("Save failed."), "Record not found");
    }

    #[test]
    fn date_errors_read_naturally() {
        let err = DateValidationError::DayExceedsMonth {
            year: 2023,
            month: 2,
            day: 29,
            max: 28,
        };
        assert_eq!(err.to_string(), "2023-02 only has 28 days (entered 29).");
        assert_eq!(
            DateValidationError::MonthOutOfRange { month: 13 }.to_string(),
            "Month must be between 1 and 12 (entered 13)."
        );
    }
}
