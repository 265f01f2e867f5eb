//! Display formatting: Indian-grouped rupee amounts and placeholder text.

#![allow(missing_docs)]

use crate::dataset::Rupees;

/// Placeholder shown on detail pages for absent or zero amounts.
pub const NOT_AVAILABLE: &str = "N/A";

/// Group digits the Indian way: last three, then pairs (`12,34,56,789`).
#[must_use]
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        out.extend(pair.iter().map(|&b| char::from(b)));
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// `₹` plus Indian grouping.
#[must_use]
pub fn format_inr(value: Rupees) -> String {
    format!("₹{}", group_indian(value))
}

/// Card and comparison style: absent amounts become `dash`.
#[must_use]
pub fn rupees_or(value: Option<Rupees>, dash: &str) -> String {
    value.map_or_else(|| dash.to_string(), format_inr)
}

/// Detail style: absent and zero amounts both read "N/A".
#[must_use]
pub fn rupees_or_na(value: Option<Rupees>) -> String {
    match value {
        Some(v) if v > 0 => format_inr(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Average rounded to whole rupees.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_average(value: f64) -> String {
    if value.is_finite() && value > 0.0 {
        format_inr(value.round() as u64)
    } else {
        format_inr(0)
    }
}

#[must_use]
pub fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|s| !s.trim().is_empty()).unwrap_or(fallback)
}

/// `bank_deposits` → `Bank Deposits`.
#[must_use]
pub fn title_case(field: &str) -> String {
    field
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1_000), "1,000");
        assert_eq!(group_indian(12_345), "12,345");
        assert_eq!(group_indian(123_456), "1,23,456");
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(123_456_789), "12,34,56,789");
        assert_eq!(group_indian(1_000_000_000), "1,00,00,00,000");
    }

    #[test]
    fn rupee_prefix() {
        assert_eq!(format_inr(250_000_000), "₹25,00,00,000");
    }

    #[test]
    fn placeholders() {
        assert_eq!(rupees_or(None, "—"), "—");
        assert_eq!(rupees_or(Some(0), "—"), "₹0");
        assert_eq!(rupees_or_na(Some(0)), "N/A");
        assert_eq!(rupees_or_na(None), "N/A");
        assert_eq!(rupees_or_na(Some(1_500)), "₹1,500");
        assert_eq!(text_or(Some("  "), "—"), "—");
        assert_eq!(text_or(Some("Graduate"), "—"), "Graduate");
    }

    #[test]
    fn average_rounds() {
        assert_eq!(format_average(1_234.5), "₹1,235");
        assert_eq!(format_average(0.0), "₹0");
        assert_eq!(format_average(f64::NAN), "₹0");
    }

    #[test]
    fn title_cases_field_names() {
        assert_eq!(title_case("bank_deposits"), "Bank Deposits");
        assert_eq!(title_case("non_agricultural_land"), "Non Agricultural Land");
        assert_eq!(title_case("cash"), "Cash");
    }
}
