//! Segmented `YYYY.MM.DD` date entry.
//!
//! The field is three ordered slots (year, month, day). A digit only lands in
//! a slot once every slot before it is full, so the typed digit string fully
//! determines the state and every handler below reduces to "compute the new
//! digit string, then refill the slots".

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::error::{CalendarPickError, DateValidationError};

pub const MAX_DIGITS: usize = 8;
const PLACEHOLDER: char = '_';
const SEPARATOR: &str = ".";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Year,
    Month,
    Day,
}

impl SegmentKind {
    pub fn width(self) -> usize {
        match self {
            SegmentKind::Year => 4,
            SegmentKind::Month | SegmentKind::Day => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    kind: SegmentKind,
    digits: String,
}

impl Segment {
    fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            digits: String::with_capacity(kind.width()),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() == self.kind.width()
    }

    fn push(&mut self, digit: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Typed digits padded with placeholders; empty while nothing is typed.
    pub fn render(&self) -> String {
        if self.digits.is_empty() {
            return String::new();
        }
        let mut out = self.digits.clone();
        out.extend(std::iter::repeat(PLACEHOLDER).take(self.kind.width() - self.digits.len()));
        out
    }

    fn value(&self) -> Option<u32> {
        if self.is_full() {
            self.digits.parse().ok()
        } else {
            None
        }
    }
}

/// How far left-to-right filling has progressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStage {
    Empty,
    Year,
    Month,
    Day,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFieldState {
    pub year: Segment,
    pub month: Segment,
    pub day: Segment,
    /// `YYYY-MM-DD` once all eight digits are present, otherwise empty.
    pub canonical_value: String,
    /// Advisory only: the canonical date lies after today.
    pub is_future: bool,
}

impl Default for DateFieldState {
    fn default() -> Self {
        Self {
            year: Segment::new(SegmentKind::Year),
            month: Segment::new(SegmentKind::Month),
            day: Segment::new(SegmentKind::Day),
            canonical_value: String::new(),
            is_future: false,
        }
    }
}

impl DateFieldState {
    fn from_digits(digits: &str, today: NaiveDate) -> Self {
        let mut state = Self::default();
        for digit in digits.chars().filter(|c| c.is_ascii_digit()).take(MAX_DIGITS) {
            state.push_digit(digit);
        }
        if state.stage() == FillStage::Complete {
            state.canonical_value = format!(
                "{}-{}-{}",
                state.year.digits, state.month.digits, state.day.digits
            );
            state.is_future = state.calendar_date().is_some_and(|date| date > today);
        }
        state
    }

    fn push_digit(&mut self, digit: char) -> bool {
        for slot in [&mut self.year, &mut self.month, &mut self.day] {
            if !slot.is_full() {
                return slot.push(digit);
            }
        }
        false
    }

    pub fn stage(&self) -> FillStage {
        if self.year.is_empty() {
            FillStage::Empty
        } else if !self.year.is_full() || self.month.is_empty() {
            FillStage::Year
        } else if !self.month.is_full() || self.day.is_empty() {
            FillStage::Month
        } else if !self.day.is_full() {
            FillStage::Day
        } else {
            FillStage::Complete
        }
    }

    pub fn digits(&self) -> String {
        [&self.year, &self.month, &self.day]
            .iter()
            .map(|segment| segment.digits())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }

    /// Non-empty segments joined with `.`.
    pub fn display_value(&self) -> String {
        [&self.year, &self.month, &self.day]
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.render())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// The typed date if it exists on the calendar.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let year = self.year.value()? as i32;
        NaiveDate::from_ymd_opt(year, self.month.value()?, self.day.value()?)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn validate_date(year: i32, month: u32, day: u32) -> Result<(), DateValidationError> {
    if !(1..=12).contains(&month) {
        return Err(DateValidationError::MonthOutOfRange { month });
    }
    if !(1..=31).contains(&day) {
        return Err(DateValidationError::DayOutOfRange { day });
    }
    let max = days_in_month(year, month);
    if day > max {
        return Err(DateValidationError::DayExceedsMonth {
            year,
            month,
            day,
            max,
        });
    }
    Ok(())
}

/// Outcome of a calendar check in the shape the notification area expects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl<T> From<&Result<T, DateValidationError>> for ValidationResult {
    fn from(result: &Result<T, DateValidationError>) -> Self {
        match result {
            Ok(_) => Self {
                valid: true,
                message: None,
            },
            Err(err) => Self {
                valid: false,
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

/// What the host should do with a keydown after the field has seen it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Let the browser handle the key.
    PassThrough,
    /// Drop the key.
    Suppress,
    /// The field changed; drop the key and render the new state.
    Replace,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone, Debug)]
pub struct DateSegmentInput {
    state: DateFieldState,
    today: fn() -> NaiveDate,
}

impl Default for DateSegmentInput {
    fn default() -> Self {
        Self::with_today(local_today)
    }
}

impl DateSegmentInput {
    pub fn with_today(today: fn() -> NaiveDate) -> Self {
        Self {
            state: DateFieldState::default(),
            today,
        }
    }

    pub fn state(&self) -> &DateFieldState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = DateFieldState::default();
    }

    pub fn on_input(&mut self, raw: &str) -> &DateFieldState {
        self.state = DateFieldState::from_digits(raw, (self.today)());
        debug!(
            display = %self.state.display_value(),
            canonical = %self.state.canonical_value,
            "date input"
        );
        &self.state
    }

    pub fn on_paste(&mut self, clipboard_text: &str) -> &DateFieldState {
        let digits: String = clipboard_text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(MAX_DIGITS)
            .collect();
        self.on_input(&digits)
    }

    pub fn on_keydown(&mut self, key: &str, modifiers: Modifiers) -> KeyAction {
        match key {
            "Backspace" => {
                let mut digits = self.state.digits();
                digits.pop();
                self.on_input(&digits);
                KeyAction::Replace
            }
            "Delete" => {
                self.reset();
                KeyAction::Replace
            }
            "ArrowLeft" | "ArrowRight" | "Home" | "End" | "Tab" => KeyAction::PassThrough,
            "a" | "A" if modifiers.ctrl || modifiers.meta => KeyAction::PassThrough,
            key if key.len() == 1 && key.chars().all(|c| c.is_ascii_digit()) => {
                KeyAction::PassThrough
            }
            _ => KeyAction::Suppress,
        }
    }

    /// Runs the calendar check once all eight digits are present. A failing
    /// date clears the whole field.
    pub fn on_blur(&mut self) -> Result<&DateFieldState, DateValidationError> {
        if self.state.stage() != FillStage::Complete {
            return Ok(&self.state);
        }

        let (Some(year), Some(month), Some(day)) = (
            self.state.year.value(),
            self.state.month.value(),
            self.state.day.value(),
        ) else {
            return Ok(&self.state);
        };

        if let Err(err) = validate_date(year as i32, month, day) {
            warn!(value = %self.state.canonical_value, %err, "rejected typed date");
            self.reset();
            return Err(err);
        }
        Ok(&self.state)
    }

    /// Takes a `YYYY-MM-DD` value from the native picker as-is.
    pub fn on_calendar_pick(&mut self, iso_date: &str) -> Result<&DateFieldState, CalendarPickError> {
        let parts = iso_date.split('-').collect::<Vec<_>>();
        let well_formed = parts.len() == 3
            && [SegmentKind::Year, SegmentKind::Month, SegmentKind::Day]
                .iter()
                .zip(&parts)
                .all(|(kind, part)| {
                    part.len() == kind.width() && part.chars().all(|c| c.is_ascii_digit())
                });
        if !well_formed {
            return Err(CalendarPickError(iso_date.to_string()));
        }

        let mut state = DateFieldState::from_digits(&parts.concat(), (self.today)());
        state.canonical_value = iso_date.to_string();
        self.state = state;
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn input() -> DateSegmentInput {
        DateSegmentInput::with_today(fixed_today)
    }

    fn typed(raw: &str) -> DateSegmentInput {
        let mut field = input();
        field.on_input(raw);
        field
    }

    #[test]
    fn segments_fill_left_to_right() {
        let cases = [
            ("1", "1___", FillStage::Year),
            ("1992", "1992", FillStage::Year),
            ("19920", "1992.0_", FillStage::Month),
            ("199201", "1992.01", FillStage::Month),
            ("1992010", "1992.01.0_", FillStage::Day),
            ("19920101", "1992.01.01", FillStage::Complete),
        ];
        for (raw, display, stage) in cases {
            let field = typed(raw);
            assert_eq!(field.state().display_value(), display, "input {raw}");
            assert_eq!(field.state().stage(), stage, "input {raw}");
        }
    }

    #[test]
    fn canonical_only_with_eight_digits() {
        assert_eq!(typed("1992010").state().canonical_value, "");
        assert_eq!(typed("19920101").state().canonical_value, "1992-01-01");
    }

    #[test]
    fn digits_beyond_eight_are_dropped() {
        let field = typed("1992010199");
        assert_eq!(field.state().digits(), "19920101");
    }

    #[test]
    fn invalid_dates_are_not_rejected_while_typing() {
        let field = typed("20231399");
        assert_eq!(field.state().canonical_value, "2023-13-99");
        assert!(!field.state().is_future);
    }

    #[test]
    fn non_digits_are_ignored_in_any_position() {
        let digits = "19920101";
        for len in 1..=MAX_DIGITS {
            let clean = &digits[..len];
            let noisy: String = clean.chars().flat_map(|c| [c, '.', 'x']).collect();
            assert_eq!(typed(&noisy).state(), typed(clean).state(), "length {len}");
        }
    }

    #[test]
    fn display_value_is_a_fixed_point() {
        let digits = "20240229";
        for len in 0..=MAX_DIGITS {
            let mut field = typed(&digits[..len]);
            let before = field.state().clone();
            let display = before.display_value();
            assert_eq!(field.on_input(&display), &before, "length {len}");
        }
    }

    #[test]
    fn backspace_drops_the_last_digit() {
        let mut field = typed("19920101");
        assert_eq!(field.on_keydown("Backspace", Modifiers::default()), KeyAction::Replace);
        let state = field.state();
        assert_eq!(state.digits(), "1992010");
        assert_eq!(state.year.render(), "1992");
        assert_eq!(state.month.render(), "01");
        assert_eq!(state.day.render(), "0_");
        assert_eq!(state.canonical_value, "");
    }

    #[test]
    fn backspace_collapses_to_the_previous_segment() {
        let mut field = typed("19920");
        field.on_keydown("Backspace", Modifiers::default());
        assert_eq!(field.state().display_value(), "1992");
        assert!(field.state().month.is_empty());
    }

    #[test]
    fn backspace_on_empty_field_stays_empty() {
        let mut field = input();
        field.on_keydown("Backspace", Modifiers::default());
        assert!(field.state().is_empty());
    }

    #[test]
    fn delete_clears_everything() {
        let mut field = typed("19920101");
        assert_eq!(field.on_keydown("Delete", Modifiers::default()), KeyAction::Replace);
        assert_eq!(field.state(), &DateFieldState::default());
    }

    #[test]
    fn key_filtering() {
        let mut field = input();
        let none = Modifiers::default();
        let ctrl = Modifiers {
            ctrl: true,
            meta: false,
        };
        let meta = Modifiers {
            ctrl: false,
            meta: true,
        };

        for key in ["0", "7", "ArrowLeft", "ArrowRight", "Home", "End", "Tab"] {
            assert_eq!(field.on_keydown(key, none), KeyAction::PassThrough, "{key}");
        }
        assert_eq!(field.on_keydown("a", ctrl), KeyAction::PassThrough);
        assert_eq!(field.on_keydown("a", meta), KeyAction::PassThrough);
        for key in ["a", "-", ".", " ", "Enter", "ArrowUp", "F5", "١"] {
            assert_eq!(field.on_keydown(key, none), KeyAction::Suppress, "{key}");
        }
    }

    #[test]
    fn paste_keeps_the_first_eight_digits() {
        let mut field = input();
        field.on_paste("2024/03/15 12:30");
        assert_eq!(field.state().canonical_value, "2024-03-15");
        assert_eq!(field.state().display_value(), "2024.03.15");
    }

    #[test]
    fn blur_leaves_legal_dates_alone() {
        for raw in ["20000229", "20240229", "19920101", "20231231"] {
            let mut field = typed(raw);
            let before = field.state().clone();
            assert_eq!(field.on_blur(), Ok(&before), "{raw}");
        }
    }

    #[test]
    fn blur_resets_illegal_dates() {
        for raw in ["29990229", "19000229", "20231301", "20230100", "20230431", "20230132"] {
            let mut field = typed(raw);
            let result = field.on_blur().map(|state| state.clone());
            assert!(result.is_err(), "{raw}");
            assert_eq!(field.state(), &DateFieldState::default(), "{raw}");
        }
    }

    #[test]
    fn blur_ignores_partial_dates() {
        let mut field = typed("202313");
        let before = field.state().clone();
        assert_eq!(field.on_blur(), Ok(&before));
    }

    #[test]
    fn blur_errors_carry_a_message() {
        let mut field = typed("20230230");
        let result = field.on_blur().map(|_| ());
        let summary = ValidationResult::from(&result);
        assert!(!summary.valid);
        assert_eq!(
            summary.message.as_deref(),
            Some("2023-02 only has 28 days (entered 30).")
        );
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2999));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn validation_agrees_with_the_calendar() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100, 2999] {
            for month in 0..=13 {
                for day in 0..=32 {
                    let ours = validate_date(year, month, day).is_ok();
                    let chrono = NaiveDate::from_ymd_opt(year, month, day).is_some();
                    assert_eq!(ours, chrono, "{year}-{month}-{day}");
                }
            }
        }
    }

    #[test]
    fn future_dates_are_flagged_but_valid() {
        let mut field = typed("20261017");
        assert!(field.state().is_future);
        assert!(field.on_blur().is_ok());
        assert_eq!(field.state().canonical_value, "2026-10-17");

        assert!(!typed("20261016").state().is_future);
        assert!(!typed("20261015").state().is_future);
    }

    #[test]
    fn calendar_pick_sets_everything_at_once() {
        let mut field = input();
        let state = field.on_calendar_pick("2027-01-05").cloned();
        let state = state.unwrap();
        assert_eq!(state.display_value(), "2027.01.05");
        assert_eq!(state.canonical_value, "2027-01-05");
        assert!(state.is_future);
    }

    #[test]
    fn calendar_pick_rejects_malformed_values() {
        let mut field = typed("1992");
        for bad in ["", "2024-1-05", "2024/01/05", "20240105", "2024-01-05-01", "abcd-ef-gh"] {
            assert!(field.on_calendar_pick(bad).is_err(), "{bad:?}");
        }
        assert_eq!(field.state().display_value(), "1992");
    }
}
