//! Plain-text proforma invoices written to the local invoice folder.

use std::{
    fmt::{self, Write as _},
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use time::Date;
use tracing::info;

use crate::{
    domain::{compute_breakdown, CarListing, CustomerInfo, SellerInfo, ShippingOption, ShippingRates},
    util::format::format_yen,
};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("vehicle {0} has no price to invoice")]
    MissingPrice(String),
    #[error("vehicle {vehicle} cannot be invoiced: {reason}")]
    InvalidQuote { vehicle: String, reason: String },
    #[error("failed to write invoice: {0}")]
    Io(#[from] io::Error),
    #[error("failed to lay out invoice: {0}")]
    Format(#[from] fmt::Error),
}

/// Everything an invoice is issued for.
pub struct InvoiceRequest<'a> {
    pub seller: &'a SellerInfo,
    pub car: &'a CarListing,
    pub customer: &'a CustomerInfo,
    pub shipping: ShippingOption,
    pub rates: &'a ShippingRates,
    pub date: Date,
}

impl InvoiceRequest<'_> {
    fn vehicle_id(&self) -> &str {
        self.car.id.as_deref().unwrap_or("N/A")
    }

    pub fn file_name(&self) -> String {
        format!(
            "invoice_{}_{:04}{:02}{:02}.txt",
            self.vehicle_id(),
            self.date.year(),
            u8::from(self.date.month()),
            self.date.day()
        )
    }
}

pub fn render_invoice(request: &InvoiceRequest<'_>) -> Result<String, InvoiceError> {
    let car = request.car;
    let vehicle = request.vehicle_id().to_string();
    let price = car
        .price
        .ok_or_else(|| InvoiceError::MissingPrice(vehicle.clone()))?;
    let quote = compute_breakdown(price, request.shipping, request.rates);
    if let Some(err) = quote.error() {
        return Err(InvoiceError::InvalidQuote {
            vehicle,
            reason: err.to_string(),
        });
    }
    let breakdown = quote.breakdown();

    let seller = request.seller;
    let customer = request.customer;
    let mut out = String::new();

    writeln!(out, "PROFORMA INVOICE")?;
    writeln!(out, "Date: {}", request.date)?;
    writeln!(out)?;
    writeln!(out, "Seller Name: {}", seller.name)?;
    writeln!(out, "Seller Address: {}", seller.address)?;
    writeln!(out, "Seller Phone: {}", seller.phone)?;
    writeln!(out, "Seller Email: {}", seller.email)?;
    writeln!(out)?;
    for (label, value) in [
        ("Name", &customer.name),
        ("Email", &customer.email),
        ("Phone", &customer.phone),
    ] {
        if !value.trim().is_empty() {
            writeln!(out, "Customer {label}: {value}")?;
        }
    }
    if let Some(destination) = customer.destination() {
        writeln!(out, "Destination: {destination}")?;
    }
    writeln!(out)?;

    writeln!(out, "Vehicle Details")?;
    writeln!(out, "{} (ID: {})", car.display_name(), request.vehicle_id())?;
    writeln!(
        out,
        "Color: {}, Transmission: {}",
        car.color.as_deref().unwrap_or("N/A"),
        car.transmission.as_deref().unwrap_or("N/A")
    )?;
    writeln!(out)?;

    writeln!(out, "Pricing ({})", request.shipping)?;
    for (label, amount) in [
        ("Base price", breakdown.base_price),
        ("Domestic transport", breakdown.domestic_transport),
        ("Freight cost", breakdown.freight_cost),
        ("Insurance", breakdown.insurance),
    ] {
        if amount > 0.0 {
            writeln!(out, "- {label}: {}", format_yen(amount))?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Total Price: {}", format_yen(breakdown.total_price))?;

    Ok(out)
}

/// Renders the invoice and writes it into `dir`, creating the folder.
pub fn write_invoice(dir: &Path, request: &InvoiceRequest<'_>) -> Result<PathBuf, InvoiceError> {
    let contents = render_invoice(request)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(request.file_name());
    fs::write(&path, contents)?;
    info!(path = %path.display(), vehicle = request.vehicle_id(), "wrote proforma invoice");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    fn car() -> CarListing {
        CarListing {
            id: Some("VID0042".into()),
            year: Some(2021),
            make: Some("Mazda".into()),
            model: Some("CX-5".into()),
            color: Some("Red".into()),
            price: Some(2_000_000.0),
            ..CarListing::default()
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Amina Otieno".into(),
            email: "amina@example.com".into(),
            phone: String::new(),
            country: Some("Kenya".into()),
            port_of_discharge: Some("Mombasa".into()),
        }
    }

    fn date() -> Date {
        Date::from_calendar_date(2026, Month::March, 7).unwrap()
    }

    #[test]
    fn lists_enabled_components_and_total() {
        let seller = SellerInfo::default();
        let car = car();
        let customer = customer();
        let rates = ShippingRates::default();
        let request = InvoiceRequest {
            seller: &seller,
            car: &car,
            customer: &customer,
            shipping: ShippingOption::Cnf,
            rates: &rates,
            date: date(),
        };
        let text = render_invoice(&request).unwrap();

        assert!(text.contains("Seller Name: Otoz.ai"));
        assert!(text.contains("Customer Name: Amina Otieno"));
        assert!(!text.contains("Customer Phone"));
        assert!(text.contains("Destination: Mombasa, Kenya"));
        assert!(text.contains("2021 Mazda CX-5 (ID: VID0042)"));
        assert!(text.contains("Color: Red, Transmission: N/A"));
        assert!(text.contains("Pricing (C&F)"));
        assert!(text.contains("- Base price: ¥2,000,000"));
        assert!(text.contains("- Freight cost: ¥150,000"));
        assert!(!text.contains("Insurance"));
        assert!(text.contains("Total Price: ¥2,200,000"));
    }

    #[test]
    fn refuses_invalid_prices() {
        let seller = SellerInfo::default();
        let customer = customer();
        let rates = ShippingRates::default();
        let mut car = car();
        car.price = None;
        let request = InvoiceRequest {
            seller: &seller,
            car: &car,
            customer: &customer,
            shipping: ShippingOption::Fob,
            rates: &rates,
            date: date(),
        };
        assert!(matches!(render_invoice(&request), Err(InvoiceError::MissingPrice(_))));

        let mut negative = car.clone();
        negative.price = Some(-1.0);
        let request = InvoiceRequest {
            car: &negative,
            ..request
        };
        assert!(matches!(
            render_invoice(&request),
            Err(InvoiceError::InvalidQuote { .. })
        ));
    }

    #[test]
    fn layout_failures_surface_as_errors() {
        let err: InvoiceError = fmt::Error.into();
        assert!(matches!(err, InvoiceError::Format(_)));
        assert!(err.to_string().starts_with("failed to lay out invoice"));
    }

    #[test]
    fn writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let seller = SellerInfo::default();
        let car = car();
        let customer = customer();
        let rates = ShippingRates::default();
        let request = InvoiceRequest {
            seller: &seller,
            car: &car,
            customer: &customer,
            shipping: ShippingOption::Cif,
            rates: &rates,
            date: date(),
        };
        let path = write_invoice(&dir.path().join("invoices"), &request).unwrap();
        assert_eq!(path.file_name().unwrap(), "invoice_VID0042_20260307.txt");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Insurance: ¥40,000"));
        assert!(text.contains("Total Price: ¥2,240,000"));
    }
}
