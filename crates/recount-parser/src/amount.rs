//! Amount token parsing.
//!
//! Posting amounts look like `₹27,000.00`, `1,250.00`, or `40000`. The
//! fraction, when present, is exactly two digits. Anything that fails to
//! match is treated as amount-absent - the posting becomes a candidate for
//! inference, it is not a parse error.

use recount_core::{Amount, DEFAULT_CURRENCY};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Map a currency glyph to its code. Unknown or absent glyphs fall back to
/// the default currency.
fn symbol_currency(glyph: &str) -> &'static str {
    match glyph {
        "₹" => "INR",
        _ => DEFAULT_CURRENCY,
    }
}

/// Parser for raw amount tokens.
#[derive(Debug)]
pub struct AmountParser {
    pattern: Regex,
}

impl AmountParser {
    /// Compile the amount pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // glyph? sign? digit-groups fraction? - searched, not anchored
            pattern: Regex::new(r"([₹]?)\s*(-?[\d,]+(?:\.\d{2})?)").expect("amount pattern"),
        }
    }

    /// Parse an amount token into a signed decimal plus currency code.
    ///
    /// Thousands-separating commas are stripped; the decimal keeps exactly
    /// the digits present (no rounding). Returns `None` when the text holds
    /// no recognizable amount.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Amount> {
        let caps = self.pattern.captures(text.trim())?;
        let digits = caps[2].replace(',', "");
        let number = Decimal::from_str(&digits).ok()?;
        Some(Amount::new(number, symbol_currency(&caps[1])))
    }
}

impl Default for AmountParser {
    fn default() -> Self {
        Self::new()
    }
}
