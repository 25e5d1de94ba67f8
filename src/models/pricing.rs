// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Price derivation for per-kilogram products (UI-agnostic, pure).

use rust_decimal::Decimal;

/// Prices derived from a product's unit price, VAT rate, and package weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivedPrices {
    /// Per-kilogram price including VAT.
    pub vat_price: Decimal,
    /// Price of one package excluding VAT; zero when the product has no package.
    pub package_price_excl_vat: Decimal,
    /// Price of one package including VAT; zero when the product has no package.
    pub package_price_incl_vat: Decimal,
}

/// Derive VAT-inclusive and package prices.
///
/// `vat_rate` is a percentage (`20` means 20 %). A `package_kg` of zero (or
/// below) means the product is sold by the kilogram only, so both package
/// prices are zero. Input validation is the caller's concern.
///
/// # Examples
///
/// ```rust,ignore
/// use rust_decimal::Decimal;
/// let prices = compute(Decimal::from(100), Decimal::from(20), Decimal::from(10));
/// assert_eq!(prices.vat_price, Decimal::from(120));
/// assert_eq!(prices.package_price_incl_vat, Decimal::from(1200));
/// ```
pub fn compute(unit_price: Decimal, vat_rate: Decimal, package_kg: Decimal) -> DerivedPrices {
    let vat_price = unit_price * (Decimal::ONE + vat_rate / Decimal::ONE_HUNDRED);

    let (package_price_excl_vat, package_price_incl_vat) = if package_kg > Decimal::ZERO {
        (unit_price * package_kg, vat_price * package_kg)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    DerivedPrices {
        vat_price,
        package_price_excl_vat,
        package_price_incl_vat,
    }
}
