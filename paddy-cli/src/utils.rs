use paddy_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats a money amount with comma thousands separators and two decimal
/// places (e.g. `12345.5` → `"12,345.50"`).
pub fn format_amount(value: Decimal) -> String {
    let text = format!("{:.2}", round_half_up(value));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Formats a quantity (area, yield) without padding, trailing zeros
/// stripped.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats an optional amount, using "—" when the metric is unavailable.
/// `unit` is appended after a space when the value is present.
pub fn opt_amount(
    value: Option<Decimal>,
    unit: &str,
) -> String {
    match value {
        Some(v) => format!("{} {unit}", format_amount(v)),
        None => "—".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
