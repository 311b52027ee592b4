//! Content-field recognition for text runs.
//!
//! A priority-ordered regex table maps a text value onto a field kind
//! for prop naming downstream (a price column, a masked card number, a
//! date cell). First match wins; unrecognized text is simply `None`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::FieldKind;

/// The recognition table, highest priority first.
static CONTENT_PATTERNS: Lazy<Vec<(FieldKind, Regex)>> = Lazy::new(|| {
    let table: &[(FieldKind, &str)] = &[
        // $1,299.00 / €45 / £9.99
        (FieldKind::Price, r"^[$€£¥]\s*\d[\d,]*(\.\d+)?$"),
        // +120.50 / -45 — signed before unsigned so Amount wins its sign
        (FieldKind::Amount, r"^[+-]\s*[$€£¥]?\d[\d,]*(\.\d+)?$"),
        (
            FieldKind::CardBrand,
            r"(?i)^(visa|mastercard|amex|american\s+express|discover|diners\s+club|jcb|unionpay|paypal)$",
        ),
        // •••• 4242 / **** 4242
        (FieldKind::CardLastDigits, r"^[•*]{2,}[\s-]*\d{4}$"),
        // Mar 14 / September 3, 2025
        (
            FieldKind::Date,
            r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(,?\s*\d{4})?$",
        ),
        // (415) 555-0123 / +1 415 555 0123 / 415-555-0123
        (
            FieldKind::Phone,
            r"^\+?\d?[\s.-]?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$",
        ),
        (FieldKind::Percentage, r"^\d+(\.\d+)?\s*%$"),
    ];

    table
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("static content pattern")))
        .collect()
});

/// Classifies a text value into a field kind, if any pattern matches.
pub fn classify_text(text: &str) -> Option<FieldKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    CONTENT_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(trimmed))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price() {
        assert_eq!(classify_text("$1,299.00"), Some(FieldKind::Price));
        assert_eq!(classify_text("€45"), Some(FieldKind::Price));
        assert_eq!(classify_text("£ 9.99"), Some(FieldKind::Price));
    }

    #[test]
    fn test_amount_requires_sign() {
        assert_eq!(classify_text("+120.50"), Some(FieldKind::Amount));
        assert_eq!(classify_text("-45"), Some(FieldKind::Amount));
        assert_eq!(classify_text("-$12.00"), Some(FieldKind::Amount));
        assert_eq!(classify_text("120.50"), None);
    }

    #[test]
    fn test_card_brand() {
        assert_eq!(classify_text("Visa"), Some(FieldKind::CardBrand));
        assert_eq!(classify_text("american express"), Some(FieldKind::CardBrand));
        assert_eq!(classify_text("Visa ending 4242"), None);
    }

    #[test]
    fn test_card_last_digits() {
        assert_eq!(classify_text("•••• 4242"), Some(FieldKind::CardLastDigits));
        assert_eq!(classify_text("**** 4242"), Some(FieldKind::CardLastDigits));
        assert_eq!(classify_text("4242"), None);
    }

    #[test]
    fn test_date() {
        assert_eq!(classify_text("Mar 14"), Some(FieldKind::Date));
        assert_eq!(classify_text("September 3, 2025"), Some(FieldKind::Date));
        assert_eq!(classify_text("14 March"), None);
    }

    #[test]
    fn test_phone() {
        assert_eq!(classify_text("(415) 555-0123"), Some(FieldKind::Phone));
        assert_eq!(classify_text("415-555-0123"), Some(FieldKind::Phone));
        assert_eq!(classify_text("+1 415 555 0123"), Some(FieldKind::Phone));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(classify_text("85%"), Some(FieldKind::Percentage));
        assert_eq!(classify_text("12.5 %"), Some(FieldKind::Percentage));
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // A signed currency value matches Amount before Price could not
        // (Price requires no sign), exercising the priority ordering.
        assert_eq!(classify_text("-$45.00"), Some(FieldKind::Amount));
    }

    #[test]
    fn test_plain_text_is_none() {
        assert_eq!(classify_text("Checkout"), None);
        assert_eq!(classify_text(""), None);
        assert_eq!(classify_text("   "), None);
    }
}
