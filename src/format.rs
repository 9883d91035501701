/// Inserts a `,` every three digits counting from the right.
///
/// Works on the digit string itself, so there is no upper bound on the
/// magnitude it can format. Non-digit input is returned unchanged in order.
pub fn group_digits(digits: &str) -> String {
    let chars = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(chars.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

pub fn format_with_commas(value: i64) -> String {
    let formatted = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

pub fn format_won(amount: i64) -> String {
    format!("{}원", format_with_commas(amount))
}

/// Share of `value` against `max` as a whole percentage, for bar widths.
pub fn bar_percent(value: i64, max: i64) -> u32 {
    if max <= 0 || value <= 0 {
        return 0;
    }
    let pct = (value as f64 / max as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}
