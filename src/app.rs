use dioxus::{prelude::*, signals::Signal};
use tracing::{info, warn};

use crate::{
    config::DeskConfig,
    domain::AppState,
    infra::inventory::{load_inventory, InventorySource},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{AssistantPage, InventoryPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Inventory {},
    #[route("/assistant")]
    Assistant {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let config = use_hook(DeskConfig::from_env);
    use_context_provider(|| config.clone());

    let state = use_signal(|| initial_state(&config));
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Link { rel: "icon", href: assets::logo_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Loads stock, then layers the saved incoterm, rates and customer on top.
fn initial_state(config: &DeskConfig) -> AppState {
    let inventory = load_inventory(&config.inventory);
    let inventory_note = match &inventory.source {
        InventorySource::File(path) => format!(
            "{} vehicles loaded from {}",
            inventory.listings.len(),
            path.display()
        ),
        InventorySource::Generated { reason } => format!(
            "Showing {} generated sample vehicles ({reason})",
            inventory.listings.len()
        ),
    };

    let mut state = AppState {
        inventory: inventory.listings,
        inventory_note,
        seller: config.seller.clone(),
        rates: config.default_rates.clone(),
        ..AppState::default()
    };
    if let Some(saved) = load_persisted_state() {
        state.apply_persisted(saved);
    }
    info!(
        vehicles = state.inventory.len(),
        shipping = %state.shipping,
        "desk ready"
    );
    state
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!(%err, "failed to persist user state");
    }
}

#[component]
pub fn Inventory() -> Element {
    rsx! { Shell { InventoryPage {} } }
}

#[component]
pub fn Assistant() -> Element {
    rsx! { Shell { AssistantPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
