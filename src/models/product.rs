// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Product domain model and validation helpers (UI-agnostic).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::pricing::{self, DerivedPrices};

/// Largest accepted VAT percentage.
const MAX_VAT_RATE: Decimal = Decimal::ONE_HUNDRED;

/// User-supplied product fields before derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    /// Price per kilogram, VAT excluded.
    pub unit_price: Decimal,
    /// VAT percentage in `[0, 100]`.
    pub vat_rate: Decimal,
    /// Package weight in kilograms; zero for kilogram-only pricing.
    pub package_kg: Decimal,
}

/// Reasons a product input is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Ürün adı boş olamaz!")]
    EmptyName,
    #[error("Kilogram fiyatı negatif olamaz.")]
    NegativeUnitPrice,
    #[error("KDV oranı 0 ile 100 arasında olmalıdır.")]
    VatOutOfRange,
    #[error("Ambalaj ağırlığı negatif olamaz.")]
    NegativePackage,
    #[error("Fiyat veya ambalaj ağırlığı çok büyük.")]
    TooLarge,
}

/// Priced catalog entry. Derived prices are computed once from the inputs
/// and cannot be changed independently; replace the product to change them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    name: String,
    unit_price: Decimal,
    vat_rate: Decimal,
    package_kg: Decimal,
    prices: DerivedPrices,
}

impl Product {
    /// Validate the input, trim the name, and derive prices.
    pub fn new(input: ProductInput) -> Result<Self, ProductError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        if input.unit_price < Decimal::ZERO {
            return Err(ProductError::NegativeUnitPrice);
        }
        if input.vat_rate < Decimal::ZERO || input.vat_rate > MAX_VAT_RATE {
            return Err(ProductError::VatOutOfRange);
        }
        if input.package_kg < Decimal::ZERO {
            return Err(ProductError::NegativePackage);
        }
        if !fits_decimal_range(&input) {
            return Err(ProductError::TooLarge);
        }

        let prices = pricing::compute(input.unit_price, input.vat_rate, input.package_kg);
        Ok(Self {
            name: name.to_string(),
            unit_price: input.unit_price,
            vat_rate: input.vat_rate,
            package_kg: input.package_kg,
            prices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    pub fn package_kg(&self) -> Decimal {
        self.package_kg
    }

    pub fn vat_price(&self) -> Decimal {
        self.prices.vat_price
    }

    pub fn package_price_excl_vat(&self) -> Decimal {
        self.prices.package_price_excl_vat
    }

    pub fn package_price_incl_vat(&self) -> Decimal {
        self.prices.package_price_incl_vat
    }

    /// True when the product is also sold in packages.
    pub fn has_package(&self) -> bool {
        self.package_kg > Decimal::ZERO
    }

    /// Stored inputs, used to pre-fill the edit form.
    pub fn input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            unit_price: self.unit_price,
            vat_rate: self.vat_rate,
            package_kg: self.package_kg,
        }
    }
}

/// Whether every derived price of `input` stays inside `Decimal`'s range.
fn fits_decimal_range(input: &ProductInput) -> bool {
    let vat_price = (input.vat_rate / Decimal::ONE_HUNDRED)
        .checked_add(Decimal::ONE)
        .and_then(|factor| input.unit_price.checked_mul(factor));
    vat_price.is_some_and(|vat_price| {
        input.unit_price.checked_mul(input.package_kg).is_some()
            && vat_price.checked_mul(input.package_kg).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: &str, vat: &str, package: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            unit_price: price.parse().unwrap(),
            vat_rate: vat.parse().unwrap(),
            package_kg: package.parse().unwrap(),
        }
    }

    #[test]
    fn new_trims_name_and_derives_prices() {
        let product = Product::new(input("  Karabiber ", "100.00", "20", "10")).unwrap();

        assert_eq!(product.name(), "Karabiber");
        assert_eq!(product.vat_price(), Decimal::from(120));
        assert_eq!(product.package_price_excl_vat(), Decimal::from(1000));
        assert_eq!(product.package_price_incl_vat(), Decimal::from(1200));
        assert!(product.has_package());
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Product::new(input("   ", "10", "20", "0")).unwrap_err();
        assert_eq!(err, ProductError::EmptyName);
    }

    #[test]
    fn new_rejects_out_of_range_numbers() {
        assert_eq!(
            Product::new(input("Kimyon", "-1", "20", "0")).unwrap_err(),
            ProductError::NegativeUnitPrice
        );
        assert_eq!(
            Product::new(input("Kimyon", "10", "100.5", "0")).unwrap_err(),
            ProductError::VatOutOfRange
        );
        assert_eq!(
            Product::new(input("Kimyon", "10", "-3", "0")).unwrap_err(),
            ProductError::VatOutOfRange
        );
        assert_eq!(
            Product::new(input("Kimyon", "10", "20", "-5")).unwrap_err(),
            ProductError::NegativePackage
        );
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(Product::new(input("Tuz", "0", "0", "0")).is_ok());
        assert!(Product::new(input("Tuz", "1", "100", "0")).is_ok());
    }

    #[test]
    fn new_rejects_prices_beyond_decimal_range() {
        assert_eq!(
            Product::new(input("Karabiber", "10000000000000000000", "20", "10000000000000"))
                .unwrap_err(),
            ProductError::TooLarge
        );
        assert_eq!(
            Product::new(input("Karabiber", "70000000000000000000000000000", "20", "0"))
                .unwrap_err(),
            ProductError::TooLarge
        );
    }

    #[test]
    fn input_round_trips_stored_fields() {
        let original = input("Pul Biber", "50.0", "10", "0");
        let product = Product::new(original.clone()).unwrap();

        assert_eq!(product.input(), original);
        assert!(!product.has_package());
    }
}
