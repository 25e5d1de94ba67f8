// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Transient quote snapshot assembled right before PDF generation.

use std::fmt;

use chrono::NaiveDateTime;

use crate::models::product::Product;

/// A precondition that blocks quote generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteWarning {
    /// The catalog is empty.
    NoProducts,
    /// The customer company name is blank.
    NoCustomer,
}

impl fmt::Display for QuoteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteWarning::NoProducts => f.write_str("PDF oluşturmak için en az bir ürün ekleyin."),
            QuoteWarning::NoCustomer => {
                f.write_str("PDF oluşturmak için müşteri firma adını girin.")
            }
        }
    }
}

/// Everything the document builder needs, frozen at generation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    company: String,
    contact: Option<String>,
    created_at: NaiveDateTime,
    products: Vec<Product>,
}

/// List every unmet generation precondition (empty when generation may proceed).
pub fn missing_preconditions(company: &str, products: &[Product]) -> Vec<QuoteWarning> {
    let mut warnings = Vec::new();
    if products.is_empty() {
        warnings.push(QuoteWarning::NoProducts);
    }
    if company.trim().is_empty() {
        warnings.push(QuoteWarning::NoCustomer);
    }
    warnings
}

impl Quote {
    /// Snapshot the session for generation, or return all unmet preconditions.
    pub fn new(
        company: &str,
        contact: &str,
        created_at: NaiveDateTime,
        products: Vec<Product>,
    ) -> Result<Self, Vec<QuoteWarning>> {
        let warnings = missing_preconditions(company, &products);
        if !warnings.is_empty() {
            return Err(warnings);
        }

        let contact = contact.trim();
        Ok(Self {
            company: company.trim().to_string(),
            contact: (!contact.is_empty()).then(|| contact.to_string()),
            created_at,
            products,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Quote date as `DD/MM/YYYY`.
    pub fn date_label(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }

    /// Quote number `<prefix>-<YYYYMMDD>-<HHMM>`.
    ///
    /// Only unique per generation minute; two quotes created within the same
    /// minute share a number.
    pub fn number(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.created_at.format("%Y%m%d-%H%M"))
    }
}

/// Suggested output file name `<stem>_<YYYYMMDD>_<HHMM>.pdf`.
pub fn file_name(stem: &str, at: NaiveDateTime) -> String {
    format!("{stem}_{}.pdf", at.format("%Y%m%d_%H%M"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::product::ProductInput;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, 42)
            .unwrap()
    }

    fn product(name: &str) -> Product {
        Product::new(ProductInput {
            name: name.into(),
            unit_price: 10.into(),
            vat_rate: 20.into(),
            package_kg: 0.into(),
        })
        .unwrap()
    }

    #[test]
    fn missing_preconditions_reports_each_problem() {
        assert_eq!(
            missing_preconditions("  ", &[]),
            vec![QuoteWarning::NoProducts, QuoteWarning::NoCustomer]
        );
        assert_eq!(
            missing_preconditions("Saloon Burger", &[]),
            vec![QuoteWarning::NoProducts]
        );
        assert_eq!(
            missing_preconditions("", &[product("Kekik")]),
            vec![QuoteWarning::NoCustomer]
        );
        assert!(missing_preconditions("Saloon Burger", &[product("Kekik")]).is_empty());
    }

    #[test]
    fn new_trims_customer_and_drops_blank_contact() {
        let quote = Quote::new(" Saloon Burger ", "   ", at(9, 5), vec![product("Kekik")]).unwrap();

        assert_eq!(quote.company(), "Saloon Burger");
        assert_eq!(quote.contact(), None);
        assert_eq!(quote.products().len(), 1);
    }

    #[test]
    fn new_keeps_contact_when_present() {
        let quote = Quote::new("Saloon", " Mehmet Yılmaz ", at(9, 5), vec![product("Kekik")])
            .unwrap();
        assert_eq!(quote.contact(), Some("Mehmet Yılmaz"));
    }

    #[test]
    fn number_and_date_follow_generation_minute() {
        let quote = Quote::new("Saloon", "", at(9, 5), vec![product("Kekik")]).unwrap();

        assert_eq!(quote.date_label(), "07/03/2026");
        assert_eq!(quote.number("BLD"), "BLD-20260307-0905");
    }

    #[test]
    fn file_name_uses_date_and_time() {
        assert_eq!(file_name("quote", at(14, 30)), "quote_20260307_1430.pdf");
    }

    #[test]
    fn warnings_have_distinct_messages() {
        assert_ne!(
            QuoteWarning::NoProducts.to_string(),
            QuoteWarning::NoCustomer.to_string()
        );
    }
}
