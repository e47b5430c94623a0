//! Monetary helpers over fixed-point decimals.
//!
//! All monetary figures in Luxe are `rust_decimal::Decimal` values in the
//! store's base currency (USD). Intermediate figures (line totals, tax)
//! stay exact; rounding happens only at the edges - display and order
//! submission - via [`round`].
//!
//! Rounding policy: half away from zero, 2 decimal places. A tax figure of
//! `7.9984` displays as `8.00`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in displayed/stored monetary amounts.
pub const SCALE: u32 = 2;

/// Round a monetary amount to 2 decimal places, half away from zero.
#[must_use]
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount for display, e.g. `$8.00`.
///
/// Negative amounts render with the sign before the symbol (`-$1.50`).
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round(amount);
    if rounded.is_sign_negative() {
        format!("-${:.2}", -rounded)
    } else {
        format!("${rounded:.2}")
    }
}
