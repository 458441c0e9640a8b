//! Vehicle stock loading from the yard's CSV export, with generated sample
//! stock when the export is missing or unusable.

use std::{
    collections::HashSet,
    fs,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::domain::{
    catalog::{fill_missing_attributes, generate_sample_stock, PresentColumns},
    CarListing, Mileage,
};

pub const DEFAULT_INVENTORY_PATH: &str = "Inventory Agasta.csv";
pub const INVENTORY_PATH_ENV: &str = "EXPORT_DESK_INVENTORY";
pub const REQUIRED_COLUMNS: [&str; 4] = ["make", "model", "year", "price"];

#[derive(Clone, Debug, PartialEq)]
pub struct InventoryConfig {
    pub path: PathBuf,
    pub mileage_range: RangeInclusive<u32>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            mileage_range: 5_000..=150_000,
        }
    }
}

impl InventoryConfig {
    /// Defaults, with the CSV path taken from `EXPORT_DESK_INVENTORY` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(INVENTORY_PATH_ENV) {
            if !path.trim().is_empty() {
                config.path = PathBuf::from(path);
            }
        }
        config
    }
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory file not found: {0}")]
    NotFound(PathBuf),
    #[error("inventory file is empty")]
    Empty,
    #[error("inventory file is missing required columns: {0}")]
    MissingColumns(String),
    #[error("failed to read inventory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse inventory: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InventorySource {
    File(PathBuf),
    Generated { reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    pub listings: Vec<CarListing>,
    pub source: InventorySource,
}

/// Raw CSV row; every column is optional and kept as text until validated.
#[derive(Debug, Default, Deserialize)]
struct InventoryRow {
    #[serde(default)]
    make: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    mileage: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    fuel: Option<String>,
    #[serde(default)]
    transmission: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    grade: Option<String>,
}

impl From<InventoryRow> for CarListing {
    fn from(row: InventoryRow) -> Self {
        CarListing {
            id: None,
            year: non_blank(row.year).and_then(|y| y.parse::<f64>().ok()).map(|y| y as i32),
            make: non_blank(row.make),
            model: non_blank(row.model),
            location: non_blank(row.location),
            mileage: non_blank(row.mileage).map(|m| Mileage::parse(&m)),
            color: non_blank(row.color),
            transmission: non_blank(row.transmission),
            fuel: non_blank(row.fuel),
            grade: non_blank(row.grade),
            price: non_blank(row.price).and_then(|p| parse_amount(&p)),
            image_url: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '¥' | ' '))
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Strict reader: fails unless the file exists, has rows and carries every
/// required column. Returns the parsed listings with the optional columns
/// the file provides.
pub fn read_inventory_csv(path: &Path) -> Result<(Vec<CarListing>, PresentColumns), InventoryError> {
    if !path.exists() {
        return Err(InventoryError::NotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Err(InventoryError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data.as_bytes());
    let headers: HashSet<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.contains(*column))
        .collect();
    if !missing.is_empty() {
        return Err(InventoryError::MissingColumns(missing.join(", ")));
    }

    let present = PresentColumns {
        mileage: headers.contains("mileage"),
        location: headers.contains("location"),
        fuel: headers.contains("fuel"),
        transmission: headers.contains("transmission"),
        color: headers.contains("color"),
        grade: headers.contains("grade"),
    };

    // Header names are matched case-insensitively.
    let lowered = csv::StringRecord::from(
        reader
            .headers()?
            .iter()
            .map(|h| h.to_ascii_lowercase())
            .collect::<Vec<_>>(),
    );
    reader.set_headers(lowered);

    let mut listings = Vec::new();
    for row in reader.deserialize::<InventoryRow>() {
        listings.push(CarListing::from(row?));
    }
    if listings.is_empty() {
        return Err(InventoryError::Empty);
    }
    Ok((listings, present))
}

/// Loads stock from `config.path`, falling back to generated sample stock.
/// Never fails; problems with the file are logged.
pub fn load_inventory(config: &InventoryConfig) -> Inventory {
    let current_year = OffsetDateTime::now_utc().year();
    load_inventory_with(config, current_year, &mut rand::thread_rng())
}

pub fn load_inventory_with<R: Rng + ?Sized>(
    config: &InventoryConfig,
    current_year: i32,
    rng: &mut R,
) -> Inventory {
    let (mut listings, present, source) = match read_inventory_csv(&config.path) {
        Ok((listings, present)) => {
            info!(
                path = %config.path.display(),
                count = listings.len(),
                "loaded inventory"
            );
            (listings, present, InventorySource::File(config.path.clone()))
        }
        Err(err) => {
            match &err {
                InventoryError::NotFound(_) => {
                    info!(path = %config.path.display(), "no inventory file, generating sample stock");
                }
                InventoryError::Empty | InventoryError::MissingColumns(_) => {
                    warn!(path = %config.path.display(), %err, "inventory unusable, generating sample stock");
                }
                InventoryError::Io(_) | InventoryError::Csv(_) => {
                    error!(path = %config.path.display(), %err, "could not read inventory, generating sample stock");
                }
            }
            let listings = generate_sample_stock(current_year, rng);
            (
                listings,
                PresentColumns::default(),
                InventorySource::Generated {
                    reason: err.to_string(),
                },
            )
        }
    };

    fill_missing_attributes(&mut listings, present, config.mileage_range.clone(), rng);
    Inventory { listings, source }
}
