use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercato_order::models::Order;

use crate::product::{Measure, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Italian,
    English,
}

impl Language {
    fn transport(&self) -> &'static str {
        match self {
            Language::Italian => "trasporto",
            Language::English => "transport",
        }
    }

    fn variable_note(&self) -> &'static str {
        match self {
            Language::Italian => "prodotto a prezzo variabile",
            Language::English => "variable price product",
        }
    }

    fn pieces_of(&self) -> &'static str {
        match self {
            Language::Italian => "Pezzi da",
            Language::English => "Pieces of",
        }
    }

    fn minimum(&self) -> &'static str {
        match self {
            Language::Italian => "Minimo",
            Language::English => "Minimum",
        }
    }

    fn recommended_maximum(&self) -> &'static str {
        match self {
            Language::Italian => "Massimo Consigliato",
            Language::English => "Recommended Maximum",
        }
    }

    fn available(&self) -> &'static str {
        match self {
            Language::Italian => "Disponibile",
            Language::English => "Available",
        }
    }

    fn total(&self) -> &'static str {
        match self {
            Language::Italian => "totale",
            Language::English => "total",
        }
    }

    fn multiple(&self) -> &'static str {
        match self {
            Language::Italian => "Multiplo",
            Language::English => "Multiple",
        }
    }
}

/// Rendering conventions for one audience: label language, currency symbol,
/// decimal separator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub language: Language,
    pub currency_symbol: String,
    pub decimal_separator: char,
}

impl Locale {
    pub fn italian() -> Self {
        Self {
            language: Language::Italian,
            currency_symbol: "€".to_string(),
            decimal_separator: ',',
        }
    }

    pub fn english() -> Self {
        Self {
            language: Language::English,
            currency_symbol: "€".to_string(),
            decimal_separator: '.',
        }
    }

    /// Two-decimal rendering with this locale's separator.
    fn amount(&self, value: Decimal) -> String {
        let plain = format!("{:.2}", value);
        if self.decimal_separator == '.' {
            plain
        } else {
            plain.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::italian()
    }
}

fn measure_name(measure: Option<&Measure>) -> &str {
    measure.map(|m| m.name.as_str()).unwrap_or("")
}

/// Per-unit contextual price line: `"2,50 € / kg"`, plus the transport
/// surcharge clause when one is configured and the variable-price note when
/// the price may fluctuate.
pub fn printable_price(
    product: &Product,
    order: &Order,
    measure: Option<&Measure>,
    locale: &Locale,
) -> String {
    let price = product.contextual_price(order, false);

    let mut line = format!(
        "{} {} / {}",
        locale.amount(price),
        locale.currency_symbol,
        measure_name(measure)
    );

    if !product.transport.is_zero() {
        line.push_str(&format!(
            " + {} {} {}",
            locale.amount(product.transport),
            locale.currency_symbol,
            locale.language.transport()
        ));
    }

    if product.variable {
        line.push_str(&format!(" ({})", locale.language.variable_note()));
    }

    line
}

/// How the product is measured: the portion size with its unit for portioned
/// products (`"0,50 kg"`, verbose `"Pezzi da 0,50 kg"`), the bare unit name
/// otherwise, empty when no measure is attached.
pub fn printable_measure(
    product: &Product,
    measure: Option<&Measure>,
    locale: &Locale,
    verbose: bool,
) -> String {
    if !product.portion_quantity.is_zero() {
        let base = format!(
            "{} {}",
            locale.amount(product.portion_quantity),
            measure_name(measure)
        );
        if verbose {
            format!("{} {}", locale.language.pieces_of(), base)
        } else {
            base
        }
    } else {
        measure_name(measure).to_string()
    }
}

/// Composite constraints line (minimum, recommended maximum, availability,
/// ordering multiple), each field included only when its source value is
/// nonzero.
/// Availability renders only when the product has a cap and a remainder was
/// computed for this order.
pub fn printable_details(
    product: &Product,
    still_available: Option<Decimal>,
    locale: &Locale,
) -> String {
    let mut details = Vec::new();

    if !product.min_quantity.is_zero() {
        details.push(format!(
            "{}: {}",
            locale.language.minimum(),
            locale.amount(product.min_quantity)
        ));
    }

    if !product.max_quantity.is_zero() {
        details.push(format!(
            "{}: {}",
            locale.language.recommended_maximum(),
            locale.amount(product.max_quantity)
        ));
    }

    if let (Some(cap), Some(remaining)) = (product.max_available, still_available) {
        details.push(format!(
            "{}: {} ({} {})",
            locale.language.available(),
            locale.amount(remaining),
            locale.amount(cap),
            locale.language.total()
        ));
    }

    if !product.multiple.is_zero() {
        details.push(format!(
            "{}: {}",
            locale.language.multiple(),
            locale.amount(product.multiple)
        ));
    }

    details.join(", ")
}
