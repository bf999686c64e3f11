//! Text helpers for showing KPIs the way the dashboard labels them.

use rust_decimal::{Decimal, RoundingStrategy};

pub const STAR_GLYPH: char = '⭐';

/// Formats a whole amount with thousands separators, e.g. `US $322,966`.
pub fn format_currency_whole(label: &str, amount: i64) -> String {
    format!("{label}{}", format_thousands(amount))
}

/// Formats an amount with two decimals after the label, e.g. `US $322.97`.
pub fn format_currency(label: &str, amount: Decimal) -> String {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{label}{amount:.2}")
}

pub fn star_glyphs(count: u32) -> String {
    std::iter::repeat_n(STAR_GLYPH, count as usize).collect()
}

/// `8.7 ⭐⭐⭐⭐⭐`, or `n/a` when nothing matched.
pub fn format_rating(average: Option<Decimal>, stars: u32) -> String {
    match average {
        Some(avg) => format!("{avg:.1} {}", star_glyphs(stars)),
        None => "n/a".to_string(),
    }
}

fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_currency_whole("US $", 322_966), "US $322,966");
        assert_eq!(format_currency_whole("US $", 999), "US $999");
        assert_eq!(format_currency_whole("US $", 1_000_000), "US $1,000,000");
        assert_eq!(format_currency_whole("US $", 0), "US $0");
        assert_eq!(format_currency_whole("", -4_500), "-4,500");
    }

    #[test]
    fn rating_shows_stars() {
        assert_eq!(format_rating(Some(dec!(7.0)), 5), "7.0 ⭐⭐⭐⭐⭐");
        assert_eq!(format_rating(None, 0), "n/a");
        assert_eq!(star_glyphs(0), "");
    }

    #[test]
    fn amounts_show_two_decimals() {
        assert_eq!(format_currency("US $", dec!(322.97)), "US $322.97");
        assert_eq!(format_currency("US $", dec!(322.9)), "US $322.90");
        assert_eq!(format_currency("US $", dec!(322.9651)), "US $322.97");
    }
}
