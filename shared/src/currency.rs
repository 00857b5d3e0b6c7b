//! Currency conversion and display formatting
//!
//! Prices are stored and transmitted as whole rupees (no minor units).
//! Conversion to the supported display currencies uses a static rate
//! table; rates are indicative constants, not live quotes.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All prices originate in rupees.
pub const BASE_CURRENCY: Currency = Currency::Inr;

// Units of the target currency per one rupee.
const USD_PER_INR: Decimal = Decimal::from_parts(12, 0, 0, false, 3); // 0.012
const EUR_PER_INR: Decimal = Decimal::from_parts(11, 0, 0, false, 3); // 0.011
const GBP_PER_INR: Decimal = Decimal::from_parts(95, 0, 0, false, 4); // 0.0095

/// Supported display currencies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

    /// ISO 4217 code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Parse an ISO 4217 code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Currency> {
        match code.to_ascii_uppercase().as_str() {
            "INR" => Some(Currency::Inr),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Units of this currency per one rupee
    pub fn rate(&self) -> Decimal {
        match self {
            Currency::Inr => Decimal::ONE,
            Currency::Usd => USD_PER_INR,
            Currency::Eur => EUR_PER_INR,
            Currency::Gbp => GBP_PER_INR,
        }
    }

    /// Rupee amounts render without fractional digits, the rest with two
    fn fraction_digits(&self) -> u32 {
        match self {
            Currency::Inr => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a whole-rupee amount into the target currency.
///
/// Identity when the target is the base currency.
pub fn convert(amount: i64, target: Currency) -> Decimal {
    Decimal::from(amount) * target.rate()
}

/// Convert and render a whole-rupee amount as a display string.
///
/// Rupees use Indian digit grouping (`₹12,94,999`); the other currencies
/// use thousands grouping with two fractional digits, rounded half-up.
pub fn format(amount: i64, currency: Currency) -> String {
    let value = convert(amount, currency);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let rounded = value
        .abs()
        .round_dp_with_strategy(currency.fraction_digits(), RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };
    match currency.fraction_digits() {
        0 => format!("{sign}{}{}", currency.symbol(), group_indian(int_part)),
        digits => {
            let mut frac = frac_part.to_string();
            while frac.len() < digits as usize {
                frac.push('0');
            }
            format!("{sign}{}{}.{frac}", currency.symbol(), group_thousands(int_part))
        }
    }
}

/// Render one amount in each requested currency
pub fn format_multi(amount: i64, currencies: &[Currency]) -> BTreeMap<Currency, String> {
    currencies
        .iter()
        .map(|&currency| (currency, format(amount, currency)))
        .collect()
}

// Last three digits, then groups of two: 1294999 -> 12,94,999
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut chunks = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, chunk) = rest.split_at(rest.len() - 2);
        chunks.push(chunk);
        rest = left;
    }
    chunks.push(rest);
    let mut out = String::with_capacity(digits.len() + chunks.len());
    for chunk in chunks.iter().rev() {
        out.push_str(chunk);
        out.push(',');
    }
    out.push_str(tail);
    out
}

fn group_thousands(digits: &str) -> String {
    let offset = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
