use tracing::debug;

use crate::format::group_digits;

/// Visible and canonical halves of an amount field.
///
/// `canonical_value` is always `display_value` with the separators removed,
/// and is empty exactly when no digit has been entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmountFieldState {
    pub display_value: String,
    pub canonical_value: String,
}

impl AmountFieldState {
    pub fn is_empty(&self) -> bool {
        self.canonical_value.is_empty()
    }

    /// Seeds the field from a stored amount when editing a record.
    pub fn from_amount(amount: i64) -> Self {
        on_input(&amount.to_string())
    }

    /// Canonical value as an integer, `None` while the field is empty.
    pub fn amount(&self) -> Option<u64> {
        self.canonical_value.parse().ok()
    }
}

fn extract_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn on_input(raw: &str) -> AmountFieldState {
    let digits = extract_digits(raw);
    if digits.is_empty() {
        return AmountFieldState::default();
    }

    let trimmed = digits.trim_start_matches('0');
    let canonical = if trimmed.is_empty() { "0" } else { trimmed };
    let state = AmountFieldState {
        display_value: group_digits(canonical),
        canonical_value: canonical.to_string(),
    };
    debug!(display = %state.display_value, canonical = %state.canonical_value, "amount input");
    state
}

/// Pasted text goes through the same digit extraction as typed input and
/// replaces the whole field rather than merging at the cursor.
pub fn on_paste(clipboard_text: &str) -> AmountFieldState {
    on_input(clipboard_text)
}
