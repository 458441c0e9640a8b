//! Reference data for the export desk: makes and models in stock, paint
//! colours, and the destination ports we ship to.

use std::ops::RangeInclusive;

use rand::{seq::SliceRandom, Rng};

use super::entities::{CarListing, Mileage};

pub const CAR_MAKERS_AND_MODELS: &[(&str, &[&str])] = &[
    (
        "Toyota",
        &["Aqua", "Vitz", "Passo", "Corolla", "Prius", "Harrier", "RAV4", "Land Cruiser", "HiAce"],
    ),
    ("Honda", &["Fit", "Vezel", "CR-V", "Civic", "Accord", "N-BOX", "Freed"]),
    ("Nissan", &["Note", "Serena", "X-Trail", "Leaf", "Skyline", "March", "Juke"]),
    ("Mazda", &["Demio", "CX-5", "CX-8", "Mazda3", "Mazda6", "Roadster"]),
    ("Mercedes-Benz", &["C-Class", "E-Class", "S-Class", "GLC", "A-Class"]),
    ("BMW", &["3 Series", "5 Series", "X1", "X3", "X5", "1 Series"]),
];

pub const CAR_COLORS: &[&str] = &[
    "White", "Black", "Silver", "Gray", "Blue", "Red", "Beige", "Brown", "Green", "Pearl White",
    "Dark Blue", "Maroon",
];

pub const PORTS_BY_COUNTRY: &[(&str, &[&str])] = &[
    ("Australia", &["Adelaide", "Brisbane", "Fremantle", "Melbourne", "Sydney"]),
    ("Canada", &["Halifax", "Vancouver"]),
    ("Chile", &["Iquique", "Valparaíso"]),
    ("Germany", &["Bremerhaven", "Hamburg"]),
    ("Ireland", &["Cork", "Dublin"]),
    ("Kenya", &["Mombasa"]),
    ("Malaysia", &["Port Klang"]),
    ("New Zealand", &["Auckland", "Lyttelton", "Napier", "Wellington"]),
    ("Pakistan", &["Karachi", "Port Qasim"]),
    ("Tanzania", &["Dar es Salaam"]),
    ("Thailand", &["Laem Chabang"]),
    ("United Arab Emirates", &["Jebel Ali (Dubai)"]),
    ("United Kingdom", &["Bristol", "Liverpool", "Southampton", "Tilbury"]),
    ("United States", &["Baltimore", "Jacksonville", "Long Beach", "Newark", "Tacoma"]),
    ("Zambia", &["(Via Dar es Salaam, Tanzania)"]),
];

pub const GRADES: &[&str] = &["4.5", "4.0", "3.5", "R"];
pub const TRANSMISSIONS: &[&str] = &["Automatic", "Manual"];
pub const DEFAULT_FUEL: &str = "Gasoline";

const PREMIUM_MAKES: &[&str] = &["Mercedes-Benz", "BMW"];
const PREMIUM_PRICE_FACTOR: f64 = 3_000_000.0;
const STANDARD_PRICE_FACTOR: f64 = 1_500_000.0;
const YEARLY_DEPRECIATION: f64 = 0.85;
const PRICE_FLOOR: f64 = 300_000.0;
const MAX_AGE_YEARS: i32 = 8;

pub fn countries() -> impl Iterator<Item = &'static str> {
    PORTS_BY_COUNTRY.iter().map(|(country, _)| *country)
}

pub fn ports_for(country: &str) -> &'static [&'static str] {
    PORTS_BY_COUNTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, ports)| *ports)
        .unwrap_or(&[])
}

/// Finds a known country mentioned anywhere in free text.
pub fn match_country(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    countries().find(|country| lowered.contains(&country.to_lowercase()))
}

/// Finds a port of `country` mentioned anywhere in free text.
pub fn match_port(country: &str, text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    ports_for(country).iter().copied().find(|port| {
        let port = port.to_lowercase();
        let bare = port.trim_start_matches("(via ").split(['(', ',']).next().unwrap_or("").trim();
        lowered.contains(&port) || (!bare.is_empty() && lowered.contains(bare))
    })
}

/// Yard price for a generated listing, before any shipping.
pub fn sample_price<R: Rng + ?Sized>(make: &str, age_years: i32, rng: &mut R) -> f64 {
    let factor = if PREMIUM_MAKES.contains(&make) {
        PREMIUM_PRICE_FACTOR
    } else {
        STANDARD_PRICE_FACTOR
    };
    let jitter = rng.gen_range(0.9..1.1);
    let price = (factor * YEARLY_DEPRECIATION.powi(age_years) * jitter).trunc();
    price.max(PRICE_FLOOR)
}

/// Two or three vehicles per catalog model, aged one to eight years.
///
/// Only make, model, year and price are set; the remaining attributes are
/// filled in by [`fill_missing_attributes`] like for a sparse CSV.
pub fn generate_sample_stock<R: Rng + ?Sized>(current_year: i32, rng: &mut R) -> Vec<CarListing> {
    let mut stock = Vec::new();
    for (make, models) in CAR_MAKERS_AND_MODELS {
        for model in *models {
            for _ in 0..rng.gen_range(2..=3) {
                let year = rng.gen_range(current_year - MAX_AGE_YEARS..=current_year - 1);
                stock.push(CarListing {
                    year: Some(year),
                    make: Some(make.to_string()),
                    model: Some(model.to_string()),
                    price: Some(sample_price(make, current_year - year, rng)),
                    ..CarListing::default()
                });
            }
        }
    }
    stock
}

/// Attribute columns that a source may omit entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentColumns {
    pub mileage: bool,
    pub location: bool,
    pub fuel: bool,
    pub transmission: bool,
    pub color: bool,
    pub grade: bool,
}

/// Gives every listing a value for each column the source lacked, then
/// assigns sequential ids and placeholder images.
pub fn fill_missing_attributes<R: Rng + ?Sized>(
    listings: &mut [CarListing],
    present: PresentColumns,
    mileage_range: RangeInclusive<u32>,
    rng: &mut R,
) {
    for (index, car) in listings.iter_mut().enumerate() {
        if !present.mileage {
            car.mileage = Some(Mileage::Km(rng.gen_range(mileage_range.clone())));
        }
        if !present.location {
            car.location = PORTS_BY_COUNTRY
                .choose(rng)
                .map(|(country, _)| country.to_string());
        }
        if !present.fuel {
            car.fuel = Some(DEFAULT_FUEL.to_string());
        }
        if !present.transmission {
            car.transmission = TRANSMISSIONS.choose(rng).map(|t| t.to_string());
        }
        if !present.color {
            car.color = CAR_COLORS.choose(rng).map(|c| c.to_string());
        }
        if !present.grade {
            car.grade = GRADES.choose(rng).map(|g| g.to_string());
        }
        car.id = Some(listing_id(index));
        car.image_url = Some(placeholder_image_url(car));
    }
}

pub fn listing_id(index: usize) -> String {
    format!("VID{index:04}")
}

pub fn placeholder_image_url(car: &CarListing) -> String {
    let text = [car.make.as_deref(), car.model.as_deref()]
        .into_iter()
        .map(|part| part.unwrap_or("Unknown").replace(' ', "+"))
        .collect::<Vec<_>>()
        .join("+");
    format!("https://placehold.co/600x400/grey/white?text={text}")
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn sample_stock_covers_every_model() {
        let mut rng = StdRng::seed_from_u64(7);
        let stock = generate_sample_stock(2026, &mut rng);
        let model_count: usize = CAR_MAKERS_AND_MODELS.iter().map(|(_, m)| m.len()).sum();
        assert!(stock.len() >= model_count * 2);
        assert!(stock.len() <= model_count * 3);
        for car in &stock {
            let year = car.year.unwrap();
            assert!((2018..=2025).contains(&year), "year {year}");
            assert!(car.price.unwrap() >= PRICE_FLOOR);
        }
    }

    #[test]
    fn premium_makes_price_higher() {
        let mut rng = StdRng::seed_from_u64(1);
        let premium = sample_price("BMW", 1, &mut rng);
        let standard = sample_price("Honda", 1, &mut rng);
        assert!(premium > 2_200_000.0 && premium < 2_900_000.0);
        assert!(standard > 1_100_000.0 && standard < 1_450_000.0);
    }

    #[test]
    fn old_cars_hit_the_price_floor() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_price("Toyota", 20, &mut rng), PRICE_FLOOR);
    }

    #[test]
    fn fills_only_missing_columns() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut listings = vec![
            CarListing {
                make: Some("Toyota".into()),
                model: Some("Land Cruiser".into()),
                color: None,
                ..CarListing::default()
            },
            CarListing::default(),
        ];
        let present = PresentColumns {
            color: true,
            ..PresentColumns::default()
        };
        fill_missing_attributes(&mut listings, present, 5_000..=150_000, &mut rng);

        let first = &listings[0];
        assert_eq!(first.id.as_deref(), Some("VID0000"));
        assert_eq!(listings[1].id.as_deref(), Some("VID0001"));
        assert_eq!(first.color, None);
        assert_eq!(first.fuel.as_deref(), Some("Gasoline"));
        assert!(GRADES.contains(&first.grade.as_deref().unwrap()));
        assert!(TRANSMISSIONS.contains(&first.transmission.as_deref().unwrap()));
        match first.mileage {
            Some(Mileage::Km(km)) => assert!((5_000..=150_000).contains(&km)),
            ref other => panic!("unexpected mileage {other:?}"),
        }
        assert_eq!(
            first.image_url.as_deref(),
            Some("https://placehold.co/600x400/grey/white?text=Toyota+Land+Cruiser")
        );
    }

    #[test]
    fn matches_countries_and_ports_in_text() {
        assert_eq!(match_country("We are in new zealand"), Some("New Zealand"));
        assert_eq!(match_country("somewhere"), None);
        assert_eq!(match_port("New Zealand", "auckland please"), Some("Auckland"));
        assert_eq!(match_port("United Arab Emirates", "Jebel Ali"), Some("Jebel Ali (Dubai)"));
        assert_eq!(match_port("Kenya", "Hamburg"), None);
        assert!(ports_for("Atlantis").is_empty());
    }
}
