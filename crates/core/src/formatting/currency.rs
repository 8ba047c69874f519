//! Currency-style amount rendering.

use rust_decimal::{Decimal, RoundingStrategy};

/// Display convention for one ISO 4217 currency.
struct CurrencyStyle {
    code: &'static str,
    /// Prefix rendered directly before the digits. `None` falls back to the
    /// code followed by a space.
    symbol: Option<&'static str>,
    minor_digits: u32,
}

const fn style(
    code: &'static str,
    symbol: Option<&'static str>,
    minor_digits: u32,
) -> CurrencyStyle {
    CurrencyStyle {
        code,
        symbol,
        minor_digits,
    }
}

/// en-US currency conventions for the codes the app deals with.
const CURRENCY_STYLES: &[CurrencyStyle] = &[
    style("USD", Some("$"), 2),
    style("EUR", Some("€"), 2),
    style("GBP", Some("£"), 2),
    style("JPY", Some("¥"), 0),
    style("CAD", Some("CA$"), 2),
    style("AUD", Some("A$"), 2),
    style("NZD", Some("NZ$"), 2),
    style("MXN", Some("MX$"), 2),
    style("BRL", Some("R$"), 2),
    style("CNY", Some("CN¥"), 2),
    style("HKD", Some("HK$"), 2),
    style("INR", Some("₹"), 2),
    style("ILS", Some("₪"), 2),
    style("KRW", Some("₩"), 0),
    style("VND", Some("₫"), 0),
    style("CLP", None, 0),
    style("ISK", None, 0),
    style("BHD", None, 3),
    style("KWD", None, 3),
    style("JOD", None, 3),
];

const DEFAULT_MINOR_DIGITS: u32 = 2;

/// Renders `amount` in currency style for `currency_code`.
///
/// Rounds half-to-even to the currency's minor units and groups thousands
/// with commas. Well-known currencies use their symbol, all others are
/// prefixed by their code:
///
/// ```
/// use iacc_core::formatting::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2), "USD"), "$1,234.56");
/// assert_eq!(format_currency(Decimal::new(-5, 1), "CHF"), "-CHF 0.50");
/// assert_eq!(format_currency(Decimal::new(1999, 0), "JPY"), "¥1,999");
/// ```
///
/// # Panics
///
/// Panics when `currency_code` is blank, or when `amount` is too large to
/// carry the currency's minor-unit digits. Transfers always carry a code and
/// a realistic amount, so either case is a caller bug.
pub fn format_currency(amount: Decimal, currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    assert!(!code.is_empty(), "currency code must not be empty");

    let known = CURRENCY_STYLES.iter().find(|s| s.code == code);
    let minor_digits = known.map_or(DEFAULT_MINOR_DIGITS, |s| s.minor_digits);
    let prefix = match known.and_then(|s| s.symbol) {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", code),
    };

    let mut rounded =
        amount.round_dp_with_strategy(minor_digits, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(minor_digits);
    assert!(
        rounded.scale() == minor_digits,
        "amount {} cannot be shown with {} minor digits",
        amount,
        minor_digits
    );

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}{}", sign, prefix, group_digits(&rounded.abs().to_string()))
}

/// Inserts thousands separators into the integer part of a plain decimal
/// string such as `1234567.89`.
fn group_digits(plain: &str) -> String {
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
