//! View model for a vehicle card: identity, attributes, and the quote for the
//! selected incoterm, already formatted for display.

use thiserror::Error;

use super::{
    entities::{CarListing, Mileage},
    shipping::{compute_breakdown, Quote, ShippingOption, ShippingRates},
};
use crate::util::format::{format_mileage_km, format_rate, format_yen};

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("listing {listing} has no {field}")]
    MissingField { listing: String, field: &'static str },
}

/// One row of the expandable cost panel.
#[derive(Clone, Debug, PartialEq)]
pub struct CostLine {
    pub label: String,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleCard {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub location: String,
    pub mileage: String,
    pub color: String,
    pub transmission: String,
    pub fuel: String,
    pub grade: String,
    pub shipping: ShippingOption,
    pub total_price: String,
    pub lines: Vec<CostLine>,
    /// Set when the listing's price could not be quoted.
    pub quote_warning: Option<String>,
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

pub fn format_mileage(mileage: Option<&Mileage>) -> String {
    match mileage {
        Some(Mileage::Km(km)) => format_mileage_km(*km),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Cost lines shown for `shipping`; components the incoterm excludes, or that
/// come to zero, are left out.
pub fn cost_lines(quote: &Quote, shipping: ShippingOption, rates: &ShippingRates) -> Vec<CostLine> {
    let breakdown = quote.breakdown();
    let mut lines = vec![CostLine {
        label: "Vehicle price".to_string(),
        amount: format_yen(breakdown.base_price),
    }];
    let optional = [
        (
            shipping.includes_domestic_transport(),
            "Domestic transport".to_string(),
            breakdown.domestic_transport,
        ),
        (
            shipping.includes_freight(),
            "Ocean freight".to_string(),
            breakdown.freight_cost,
        ),
        (
            shipping.includes_insurance(),
            format!("Marine insurance ({})", format_rate(rates.insurance_rate)),
            breakdown.insurance,
        ),
    ];
    for (included, label, amount) in optional {
        if included && amount != 0.0 {
            lines.push(CostLine {
                label,
                amount: format_yen(amount),
            });
        }
    }
    lines
}

pub fn build_card(
    car: &CarListing,
    shipping: ShippingOption,
    rates: &ShippingRates,
) -> Result<VehicleCard, RenderError> {
    let id = or_placeholder(car.id.as_deref(), UNKNOWN);
    let price = car.price.ok_or_else(|| RenderError::MissingField {
        listing: id.clone(),
        field: "price",
    })?;

    let quote = compute_breakdown(price, shipping, rates);
    let quote_warning = quote
        .error()
        .map(|err| format!("Price unavailable: {err}. Contact sales for a quote."));

    let year = car
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let title = format!(
        "{} {} {}",
        year,
        or_placeholder(car.make.as_deref(), UNKNOWN),
        or_placeholder(car.model.as_deref(), UNKNOWN)
    );

    Ok(VehicleCard {
        title,
        image_url: car.image_url.clone(),
        location: or_placeholder(car.location.as_deref(), NOT_AVAILABLE),
        mileage: format_mileage(car.mileage.as_ref()),
        color: or_placeholder(car.color.as_deref(), NOT_AVAILABLE),
        transmission: or_placeholder(car.transmission.as_deref(), NOT_AVAILABLE),
        fuel: or_placeholder(car.fuel.as_deref(), NOT_AVAILABLE),
        grade: or_placeholder(car.grade.as_deref(), NOT_AVAILABLE),
        shipping,
        total_price: format_yen(quote.breakdown().total_price),
        lines: cost_lines(&quote, shipping, rates),
        quote_warning,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prius() -> CarListing {
        CarListing {
            id: Some("VID0007".into()),
            year: Some(2019),
            make: Some("Toyota".into()),
            model: Some("Prius".into()),
            location: Some("Kenya".into()),
            mileage: Some(Mileage::Km(45_000)),
            color: Some("Pearl White".into()),
            transmission: Some("Automatic".into()),
            fuel: Some("Hybrid".into()),
            grade: Some("4.5".into()),
            price: Some(1_000_000.0),
            image_url: Some("https://placehold.co/600x400/grey/white?text=Toyota+Prius".into()),
        }
    }

    fn labels(card: &VehicleCard) -> Vec<&str> {
        card.lines.iter().map(|line| line.label.as_str()).collect()
    }

    #[test]
    fn renders_complete_listing() {
        let card = build_card(&prius(), ShippingOption::Cif, &ShippingRates::default()).unwrap();
        assert_eq!(card.id, "VID0007");
        assert_eq!(card.title, "2019 Toyota Prius");
        assert_eq!(card.mileage, "45,000 km");
        assert_eq!(card.total_price, "¥1,220,000");
        assert_eq!(card.quote_warning, None);
    }

    #[test]
    fn missing_identity_fields_use_placeholders() {
        let car = CarListing {
            price: Some(500_000.0),
            color: Some("  ".into()),
            ..CarListing::default()
        };
        let card = build_card(&car, ShippingOption::ExWorks, &ShippingRates::default()).unwrap();
        assert_eq!(card.title, "Unknown Unknown Unknown");
        assert_eq!(card.id, "Unknown");
        assert_eq!(card.location, "N/A");
        assert_eq!(card.color, "N/A");
        assert_eq!(card.mileage, "N/A");
        assert_eq!(card.grade, "N/A");
    }

    #[test]
    fn non_numeric_mileage_shows_placeholder() {
        let car = CarListing {
            mileage: Some(Mileage::Unparsed("ask dealer".into())),
            ..prius()
        };
        let card = build_card(&car, ShippingOption::Fob, &ShippingRates::default()).unwrap();
        assert_eq!(card.mileage, "N/A");
    }

    #[test]
    fn detail_lines_follow_the_incoterm() {
        let rates = ShippingRates::default();
        let car = prius();

        let ex_works = build_card(&car, ShippingOption::ExWorks, &rates).unwrap();
        assert_eq!(labels(&ex_works), ["Vehicle price"]);

        let fob = build_card(&car, ShippingOption::Fob, &rates).unwrap();
        assert_eq!(labels(&fob), ["Vehicle price", "Domestic transport"]);

        let cnf = build_card(&car, ShippingOption::Cnf, &rates).unwrap();
        assert_eq!(labels(&cnf), ["Vehicle price", "Domestic transport", "Ocean freight"]);

        let cif = build_card(&car, ShippingOption::Cif, &rates).unwrap();
        assert_eq!(
            labels(&cif),
            [
                "Vehicle price",
                "Domestic transport",
                "Ocean freight",
                "Marine insurance (2%)"
            ]
        );
        assert_eq!(cif.lines[3].amount, "¥20,000");
    }

    #[test]
    fn insurance_label_shows_the_exact_rate() {
        let rates = ShippingRates {
            insurance_rate: 0.0225,
            ..ShippingRates::default()
        };
        let cif = build_card(&prius(), ShippingOption::Cif, &rates).unwrap();
        assert_eq!(cif.lines[3].label, "Marine insurance (2.25%)");
        assert_eq!(cif.lines[3].amount, "¥22,500");
    }

    #[test]
    fn missing_price_fails_without_a_card() {
        let car = CarListing {
            price: None,
            ..prius()
        };
        let err = build_card(&car, ShippingOption::Cif, &ShippingRates::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingField {
                listing: "VID0007".into(),
                field: "price",
            }
        );
        assert_eq!(err.to_string(), "listing VID0007 has no price");
    }

    #[test]
    fn invalid_price_renders_with_warning() {
        let car = CarListing {
            price: Some(-5.0),
            ..prius()
        };
        let card = build_card(&car, ShippingOption::Cif, &ShippingRates::default()).unwrap();
        assert_eq!(card.total_price, "-¥5");
        assert_eq!(labels(&card), ["Vehicle price"]);
        assert!(card.quote_warning.unwrap().contains("positive"));
    }
}
