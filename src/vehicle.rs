use rust_decimal::Decimal;

use crate::usd::Usd;

/// One validated row of a vehicle price list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    year: i32,
    make: String,
    model: String,
    msrp: Usd,
}

impl Vehicle {
    #[must_use]
    pub fn new(year: i32, make: impl Into<String>, model: impl Into<String>, msrp: Usd) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            msrp,
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn msrp(&self) -> Usd {
        self.msrp
    }

    /// Returns the MSRP with tax applied, or `None` if it is too large to
    /// represent.
    #[must_use]
    pub fn list_price(&self, tax_rate: Decimal) -> Option<Usd> {
        self.msrp.checked_mul(tax_rate)
    }

    /// Returns the make and model as shown in a report, for example
    /// `Honda Civic`.
    #[must_use]
    pub fn make_model(&self, placeholder: &str) -> String {
        format!(
            "{} {}",
            display_name(Some(&self.make), placeholder),
            display_name(Some(&self.model), placeholder)
        )
    }
}

/// Upper-cases the first character of `name`, leaving the rest untouched.
///
/// A missing or blank name is shown as `placeholder`.
///
/// ```
/// # use vehicle_report::display_name;
/// assert_eq!(display_name(Some("honda"), "???"), "Honda");
/// assert_eq!(display_name(Some("  "), "???"), "???");
/// assert_eq!(display_name(None, "???"), "???");
/// ```
#[must_use]
pub fn display_name(name: Option<&str>, placeholder: &str) -> String {
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return placeholder.to_string();
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn display_name_capitalises_first_letter_only() {
        assert_eq!(display_name(Some("honda"), "???"), "Honda");
        assert_eq!(display_name(Some("mcLaren"), "???"), "McLaren");
        assert_eq!(display_name(Some("BMW"), "???"), "BMW");
        assert_eq!(display_name(Some("é-class"), "???"), "É-class");
    }

    #[test]
    fn display_name_uses_placeholder_for_blank_or_missing() {
        assert_eq!(display_name(Some(""), "???"), "???");
        assert_eq!(display_name(Some(" \t"), "???"), "???");
        assert_eq!(display_name(None, "???"), "???");
    }

    #[test]
    fn make_model_joins_normalized_names() {
        let car = Vehicle::new(2020, "toyota", "camry", Usd::new(dec!(25000)));
        assert_eq!(car.make_model("???"), "Toyota Camry");
    }

    #[test]
    fn list_price_applies_tax_rate() {
        let car = Vehicle::new(2019, "Ford", "Focus", Usd::new(dec!(1234.5)));
        assert_eq!(car.list_price(dec!(1.07)).unwrap().amount(), dec!(1320.915));
    }
}
