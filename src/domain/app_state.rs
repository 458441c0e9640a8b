use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    assistant::ChatSession,
    entities::{CarListing, CustomerInfo, SellerInfo},
    shipping::{ShippingOption, ShippingRates},
};

/// Narrowing applied to the inventory grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryFilter {
    pub make: Option<String>,
    pub query: String,
}

impl InventoryFilter {
    pub fn matches(&self, car: &CarListing) -> bool {
        if let Some(make) = &self.make {
            if car.make.as_deref() != Some(make.as_str()) {
                return false;
            }
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || car.display_name().to_lowercase().contains(&query)
            || car
                .id
                .as_deref()
                .is_some_and(|id| id.to_lowercase().contains(&query))
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub inventory: Vec<CarListing>,
    /// Human-readable note on where the inventory came from.
    pub inventory_note: String,
    pub filter: InventoryFilter,
    pub shipping: ShippingOption,
    pub rates: ShippingRates,
    pub seller: SellerInfo,
    pub customer: CustomerInfo,
    pub chat: ChatSession,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.shipping = persisted.shipping;
        match persisted.rates.validate() {
            Ok(()) => self.rates = persisted.rates,
            Err(err) => warn!(%err, "saved shipping rates rejected, keeping defaults"),
        }
        self.customer = persisted.customer;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            shipping: self.shipping,
            rates: self.rates.clone(),
            customer: self.customer.clone(),
        }
    }

    pub fn visible_inventory(&self) -> Vec<CarListing> {
        self.inventory
            .iter()
            .filter(|car| self.filter.matches(car))
            .cloned()
            .collect()
    }

    pub fn makes(&self) -> Vec<String> {
        let mut makes: Vec<String> = self
            .inventory
            .iter()
            .filter_map(|car| car.make.clone())
            .collect();
        makes.sort();
        makes.dedup();
        makes
    }

    /// Opens a chat about `car`, carrying over known customer details.
    pub fn start_chat(&mut self, car: CarListing, bot_name: &str) {
        let mut session = ChatSession::start(car, self.customer.clone());
        let greeting = session.greeting(bot_name);
        session.push(super::assistant::Speaker::Assistant, greeting);
        self.chat = session;
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub shipping: ShippingOption,
    #[serde(default)]
    pub rates: ShippingRates,
    #[serde(default)]
    pub customer: CustomerInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, make: &str, model: &str) -> CarListing {
        CarListing {
            id: Some(id.into()),
            year: Some(2020),
            make: Some(make.into()),
            model: Some(model.into()),
            price: Some(1_000_000.0),
            ..CarListing::default()
        }
    }

    fn state() -> AppState {
        AppState {
            inventory: vec![
                listing("VID0000", "Toyota", "Prius"),
                listing("VID0001", "Honda", "Fit"),
                listing("VID0002", "Toyota", "HiAce"),
            ],
            ..AppState::default()
        }
    }

    #[test]
    fn filters_by_make_and_query() {
        let mut state = state();
        assert_eq!(state.visible_inventory().len(), 3);

        state.filter.make = Some("Toyota".into());
        assert_eq!(state.visible_inventory().len(), 2);

        state.filter.query = "hiace".into();
        let visible = state.visible_inventory();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_deref(), Some("VID0002"));

        state.filter = InventoryFilter {
            make: None,
            query: "vid0001".into(),
        };
        assert_eq!(state.visible_inventory()[0].model.as_deref(), Some("Fit"));
    }

    #[test]
    fn lists_distinct_makes() {
        assert_eq!(state().makes(), vec!["Honda".to_string(), "Toyota".to_string()]);
    }

    #[test]
    fn persisted_state_round_trips_user_settings() {
        let mut state = state();
        state.shipping = ShippingOption::Cif;
        state.rates.freight_cost = 120_000.0;
        state.customer.country = Some("Chile".into());

        let json = serde_json::to_string(&state.to_persisted()).unwrap();
        let mut restored = AppState::default();
        restored.apply_persisted(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.shipping, ShippingOption::Cif);
        assert_eq!(restored.rates.freight_cost, 120_000.0);
        assert_eq!(restored.customer.country.as_deref(), Some("Chile"));
    }

    #[test]
    fn old_state_files_fall_back_to_defaults() {
        let persisted: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(persisted.shipping, ShippingOption::ExWorks);
        assert_eq!(persisted.rates, ShippingRates::default());
    }

    #[test]
    fn invalid_saved_rates_are_ignored() {
        let mut state = state();
        state.apply_persisted(PersistedState {
            shipping: ShippingOption::Fob,
            rates: ShippingRates {
                freight_cost: -10.0,
                ..ShippingRates::default()
            },
            customer: CustomerInfo::default(),
        });
        assert_eq!(state.shipping, ShippingOption::Fob);
        assert_eq!(state.rates, ShippingRates::default());
    }

    #[test]
    fn starting_a_chat_greets_the_customer() {
        let mut state = state();
        state.customer.country = Some("Kenya".into());
        let car = state.inventory[1].clone();
        state.start_chat(car, "Sparky");

        assert_eq!(state.chat.customer.country.as_deref(), Some("Kenya"));
        assert_eq!(state.chat.messages.len(), 1);
        assert!(state.chat.messages[0].text.contains("2020 Honda Fit"));
    }
}
