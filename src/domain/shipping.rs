//! Incoterm pricing: turns a vehicle's base price into a shipping-inclusive quote.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Which shipping costs the quoted price includes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingOption {
    #[default]
    #[serde(rename = "Ex-Works")]
    ExWorks,
    #[serde(rename = "FOB")]
    Fob,
    #[serde(rename = "C&F")]
    Cnf,
    #[serde(rename = "CIF")]
    Cif,
}

impl ShippingOption {
    pub const ALL: [ShippingOption; 4] = [
        ShippingOption::ExWorks,
        ShippingOption::Fob,
        ShippingOption::Cnf,
        ShippingOption::Cif,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShippingOption::ExWorks => "Ex-Works",
            ShippingOption::Fob => "FOB",
            ShippingOption::Cnf => "C&F",
            ShippingOption::Cif => "CIF",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ShippingOption::ExWorks => "Vehicle only, collected at the yard",
            ShippingOption::Fob => "Delivered on board at the Japanese port",
            ShippingOption::Cnf => "Shipped to your port of discharge",
            ShippingOption::Cif => "Shipped and insured to your port of discharge",
        }
    }

    pub fn includes_domestic_transport(&self) -> bool {
        !matches!(self, ShippingOption::ExWorks)
    }

    pub fn includes_freight(&self) -> bool {
        matches!(self, ShippingOption::Cnf | ShippingOption::Cif)
    }

    pub fn includes_insurance(&self) -> bool {
        matches!(self, ShippingOption::Cif)
    }

    /// Lenient lookup: blank or unknown labels fall back to Ex-Works.
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for ShippingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipping option: {0:?}")]
pub struct ParseShippingOptionError(pub String);

impl FromStr for ShippingOption {
    type Err = ParseShippingOptionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "EX-WORKS" | "EXWORKS" | "EXW" => Ok(ShippingOption::ExWorks),
            "FOB" => Ok(ShippingOption::Fob),
            "C&F" | "CNF" | "CFR" => Ok(ShippingOption::Cnf),
            "CIF" => Ok(ShippingOption::Cif),
            _ => Err(ParseShippingOptionError(input.to_string())),
        }
    }
}

/// Cost parameters in JPY applied on top of the vehicle price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingRates {
    pub domestic_transport: f64,
    pub freight_cost: f64,
    /// Fraction of the base price, e.g. 0.02 = 2%.
    pub insurance_rate: f64,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            domestic_transport: 50_000.0,
            freight_cost: 150_000.0,
            insurance_rate: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatesError {
    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("insurance rate must be between 0 and 1, got {0}")]
    InsuranceRateOutOfRange(f64),
}

impl ShippingRates {
    pub fn validate(&self) -> Result<(), RatesError> {
        for (field, value) in [
            ("domestic transport", self.domestic_transport),
            ("freight cost", self.freight_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RatesError::NegativeAmount { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.insurance_rate) {
            return Err(RatesError::InsuranceRateOutOfRange(self.insurance_rate));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub domestic_transport: f64,
    pub freight_cost: f64,
    pub insurance: f64,
    pub total_price: f64,
}

impl PriceBreakdown {
    /// All add-ons zero; the total is the base price as given.
    pub fn degenerate(base_price: f64) -> Self {
        Self {
            base_price,
            domestic_transport: 0.0,
            freight_cost: 0.0,
            insurance: 0.0,
            total_price: base_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("base price must be a positive amount, got {base_price}")]
    InvalidInput { base_price: f64 },
}

/// Outcome of a pricing request.
///
/// An `Invalid` quote still carries a breakdown (no add-ons, total equal to
/// the rejected base price) so existing displays keep working, but callers can
/// tell it apart from a genuine Ex-Works quote.
#[derive(Clone, Debug, PartialEq)]
pub enum Quote {
    Priced(PriceBreakdown),
    Invalid {
        breakdown: PriceBreakdown,
        error: QuoteError,
    },
}

impl Quote {
    pub fn breakdown(&self) -> &PriceBreakdown {
        match self {
            Quote::Priced(breakdown) => breakdown,
            Quote::Invalid { breakdown, .. } => breakdown,
        }
    }

    pub fn error(&self) -> Option<&QuoteError> {
        match self {
            Quote::Priced(_) => None,
            Quote::Invalid { error, .. } => Some(error),
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Quote::Priced(_))
    }
}

pub fn compute_breakdown(base_price: f64, option: ShippingOption, rates: &ShippingRates) -> Quote {
    if !base_price.is_finite() || base_price <= 0.0 {
        warn!(base_price, option = %option, "rejecting quote for non-positive base price");
        return Quote::Invalid {
            breakdown: PriceBreakdown::degenerate(base_price),
            error: QuoteError::InvalidInput { base_price },
        };
    }

    let domestic_transport = if option.includes_domestic_transport() {
        rates.domestic_transport
    } else {
        0.0
    };
    let freight_cost = if option.includes_freight() {
        rates.freight_cost
    } else {
        0.0
    };
    let insurance = if option.includes_insurance() {
        base_price * rates.insurance_rate
    } else {
        0.0
    };

    Quote::Priced(PriceBreakdown {
        base_price,
        domestic_transport,
        freight_cost,
        insurance,
        total_price: base_price + domestic_transport + freight_cost + insurance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(base: f64, option: ShippingOption) -> PriceBreakdown {
        match compute_breakdown(base, option, &ShippingRates::default()) {
            Quote::Priced(breakdown) => breakdown,
            other => panic!("expected priced quote, got {other:?}"),
        }
    }

    #[test]
    fn ex_works_adds_nothing() {
        assert_eq!(
            priced(100_000.0, ShippingOption::ExWorks),
            PriceBreakdown {
                base_price: 100_000.0,
                domestic_transport: 0.0,
                freight_cost: 0.0,
                insurance: 0.0,
                total_price: 100_000.0,
            }
        );
    }

    #[test]
    fn fob_adds_domestic_transport() {
        let breakdown = priced(100_000.0, ShippingOption::Fob);
        assert_eq!(breakdown.domestic_transport, 50_000.0);
        assert_eq!(breakdown.total_price, 150_000.0);
    }

    #[test]
    fn cnf_adds_transport_and_freight() {
        let breakdown = priced(100_000.0, ShippingOption::Cnf);
        assert_eq!(breakdown.freight_cost, 150_000.0);
        assert_eq!(breakdown.insurance, 0.0);
        assert_eq!(breakdown.total_price, 300_000.0);
    }

    #[test]
    fn cif_insures_two_percent_of_base() {
        let breakdown = priced(100_000.0, ShippingOption::Cif);
        assert_eq!(breakdown.insurance, 2_000.0);
        assert_eq!(breakdown.total_price, 302_000.0);
    }

    #[test]
    fn total_is_sum_of_enabled_components() {
        let rates = ShippingRates::default();
        for base in [1.0, 480_000.0, 1_234_567.0, 9_999_999.0] {
            for option in ShippingOption::ALL {
                let quote = compute_breakdown(base, option, &rates);
                let b = quote.breakdown();
                let mut expected = base;
                if option.includes_domestic_transport() {
                    expected += rates.domestic_transport;
                }
                if option.includes_freight() {
                    expected += rates.freight_cost;
                }
                if option.includes_insurance() {
                    expected += base * rates.insurance_rate;
                }
                assert!((b.total_price - expected).abs() < 1e-6, "{option} at {base}");
                assert_eq!(
                    b.total_price,
                    b.base_price + b.domestic_transport + b.freight_cost + b.insurance
                );
            }
        }
    }

    #[test]
    fn negative_price_degrades_without_add_ons() {
        for option in ShippingOption::ALL {
            let quote = compute_breakdown(-5.0, option, &ShippingRates::default());
            assert_eq!(quote.breakdown(), &PriceBreakdown::degenerate(-5.0));
            assert_eq!(quote.breakdown().total_price, -5.0);
            assert_eq!(
                quote.error(),
                Some(&QuoteError::InvalidInput { base_price: -5.0 })
            );
        }
    }

    #[test]
    fn zero_and_nan_prices_are_invalid() {
        let rates = ShippingRates::default();
        assert!(!compute_breakdown(0.0, ShippingOption::Cif, &rates).is_priced());
        assert!(!compute_breakdown(f64::NAN, ShippingOption::Fob, &rates).is_priced());
    }

    #[test]
    fn invalid_quote_is_distinguishable_from_ex_works() {
        let rates = ShippingRates::default();
        let ex_works = compute_breakdown(100_000.0, ShippingOption::ExWorks, &rates);
        let invalid = compute_breakdown(-100_000.0, ShippingOption::ExWorks, &rates);
        assert!(ex_works.is_priced());
        assert!(!invalid.is_priced());
    }

    #[test]
    fn identical_inputs_give_identical_quotes() {
        let rates = ShippingRates::default();
        let first = compute_breakdown(765_432.0, ShippingOption::Cif, &rates);
        let second = compute_breakdown(765_432.0, ShippingOption::Cif, &rates);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_rates_are_honoured() {
        let rates = ShippingRates {
            domestic_transport: 10_000.0,
            freight_cost: 90_000.0,
            insurance_rate: 0.025,
        };
        let quote = compute_breakdown(200_000.0, ShippingOption::Cif, &rates);
        assert_eq!(quote.breakdown().insurance, 5_000.0);
        assert_eq!(quote.breakdown().total_price, 305_000.0);
    }

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("FOB".parse(), Ok(ShippingOption::Fob));
        assert_eq!("c&f".parse(), Ok(ShippingOption::Cnf));
        assert_eq!("CFR".parse(), Ok(ShippingOption::Cnf));
        assert_eq!(" cif ".parse(), Ok(ShippingOption::Cif));
        assert_eq!("Ex-Works".parse(), Ok(ShippingOption::ExWorks));
        assert!("DDP".parse::<ShippingOption>().is_err());
        assert_eq!(ShippingOption::from_label_or_default(""), ShippingOption::ExWorks);
        assert_eq!(ShippingOption::from_label_or_default("DDP"), ShippingOption::ExWorks);
    }

    #[test]
    fn serializes_with_trade_labels() {
        let json = serde_json::to_string(&ShippingOption::Cnf).unwrap();
        assert_eq!(json, "\"C&F\"");
        let back: ShippingOption = serde_json::from_str("\"CIF\"").unwrap();
        assert_eq!(back, ShippingOption::Cif);
    }

    #[test]
    fn rejects_out_of_range_rates() {
        assert!(ShippingRates::default().validate().is_ok());
        let negative = ShippingRates {
            freight_cost: -1.0,
            ..ShippingRates::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(RatesError::NegativeAmount { field: "freight cost", .. })
        ));
        let rate = ShippingRates {
            insurance_rate: 1.5,
            ..ShippingRates::default()
        };
        assert_eq!(rate.validate(), Err(RatesError::InsuranceRateOutOfRange(1.5)));
    }
}
