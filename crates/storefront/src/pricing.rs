//! Derived monetary figures for the cart.
//!
//! All arithmetic is exact `Decimal`; nothing here rounds. Display and
//! order submission round through [`luxe_core::money::round`] (half away
//! from zero, 2 dp).
//!
//! Rates are fixed store-wide: flat 8% tax with no jurisdiction logic, and
//! flat 9.99 shipping waived once the subtotal reaches 100.00.

use rust_decimal::Decimal;

use crate::cart::CartLine;

/// Flat tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal at which shipping becomes free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sum of `unit price x quantity` over the given lines.
#[must_use]
pub fn subtotal<'a, I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines.into_iter().map(CartLine::line_total).sum()
}

/// Tax owed on a subtotal.
#[must_use]
pub fn tax(subtotal: Decimal) -> Decimal {
    subtotal * TAX_RATE
}

/// Shipping fee for a subtotal: zero at or above the threshold, flat
/// otherwise.
#[must_use]
pub fn shipping_fee(subtotal: Decimal) -> Decimal {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Grand total: subtotal + tax + shipping.
#[must_use]
pub fn total(subtotal: Decimal) -> Decimal {
    subtotal + tax(subtotal) + shipping_fee(subtotal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use luxe_core::money;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_shipping_boundary() {
        assert_eq!(shipping_fee(dec("100.00")), Decimal::ZERO);
        assert_eq!(shipping_fee(dec("99.99")), dec("9.99"));
        assert_eq!(shipping_fee(Decimal::ZERO), dec("9.99"));
        assert_eq!(shipping_fee(dec("250")), Decimal::ZERO);
    }

    #[test]
    fn test_tax_is_exact() {
        // 49.99 x 2 -> subtotal 99.98, tax 7.9984 exact
        assert_eq!(tax(dec("99.98")), dec("7.9984"));
        assert_eq!(money::round(tax(dec("99.98"))), dec("8.00"));
    }

    #[test]
    fn test_total_includes_tax_and_shipping() {
        let sub = dec("99.98");
        assert_eq!(total(sub), dec("99.98") + dec("7.9984") + dec("9.99"));
        assert_eq!(total(sub), dec("117.9584"));

        // Above the threshold shipping drops out
        let sub = dec("100.00");
        assert_eq!(total(sub), dec("100.00") + dec("8.00"));
    }
}
