use serde::{Deserialize, Serialize};

/// Odometer reading as it arrived from the inventory source.
#[derive(Clone, Debug, PartialEq)]
pub enum Mileage {
    Km(u32),
    /// Non-numeric text such as "unknown" or "see notes".
    Unparsed(String),
}

impl Mileage {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let cleaned: String = lowered
            .trim_end_matches("km")
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 => {
                Mileage::Km(value.round() as u32)
            }
            _ => Mileage::Unparsed(raw.trim().to_string()),
        }
    }
}

/// A vehicle in stock. Every attribute may be missing from the source data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarListing {
    pub id: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    /// Destination market the listing is advertised for.
    pub location: Option<String>,
    pub mileage: Option<Mileage>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
    /// Auction grade, e.g. "4.5" or "R".
    pub grade: Option<String>,
    /// Yard price in JPY.
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl CarListing {
    /// "2019 Toyota Prius", skipping whatever is unknown.
    pub fn display_name(&self) -> String {
        let parts: Vec<String> = [
            self.year.map(|y| y.to_string()),
            self.make.clone(),
            self.model.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            "Unknown vehicle".to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SellerInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for SellerInfo {
    fn default() -> Self {
        Self {
            name: "Otoz.ai".to_string(),
            address: "1-chōme-9-1 Akasaka, Minato City, Tōkyō-to 107-0052, Japan".to_string(),
            phone: "+81-3-1234-5678".to_string(),
            email: "sales@otoz.ai".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub port_of_discharge: Option<String>,
}

impl CustomerInfo {
    pub fn destination(&self) -> Option<String> {
        let country = self.country.as_ref()?;
        let port = self
            .port_of_discharge
            .as_deref()
            .unwrap_or("N/A");
        Some(format!("{port}, {country}"))
    }
}
