//! Display formatting

use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places shown for the headline NAV
pub const NAV_DECIMALS: u32 = 4;

/// NAV with exactly four decimal places
pub fn format_nav(nav: Decimal) -> String {
    let rounded = nav.round_dp_with_strategy(NAV_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.4}", rounded)
}

/// Whole token amount with thousands separators and the token symbol
pub fn format_supply(whole_units: U256, symbol: &str) -> String {
    let grouped = group_thousands(&whole_units.to_string());
    if symbol.is_empty() {
        grouped
    } else {
        format!("{} {}", grouped, symbol)
    }
}

/// Insert `,` every three digits from the right
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Table cell for an optional decimal
pub fn format_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nav() {
        assert_eq!(format_nav(Decimal::new(12345, 4)), "1.2345");
        assert_eq!(format_nav(Decimal::new(1, 0)), "1.0000");
        assert_eq!(format_nav(Decimal::new(123456, 5)), "1.2346");
        assert_eq!(format_nav(Decimal::new(123455, 5)), "1.2346");
        assert_eq!(format_nav(Decimal::new(123454, 5)), "1.2345");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    #[test]
    fn test_format_supply() {
        assert_eq!(format_supply(U256::from(1_250_000u64), "FNQT"), "1,250,000 FNQT");
        assert_eq!(format_supply(U256::ZERO, ""), "0");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(Some(Decimal::new(990, 5))), "0.0099");
        assert_eq!(format_cell(Some(Decimal::new(10100, 2))), "101");
        assert_eq!(format_cell(None), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }
}
