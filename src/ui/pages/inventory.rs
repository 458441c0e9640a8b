use dioxus::prelude::*;
use tracing::error;

use crate::{
    app::Route,
    domain::{build_card, compute_breakdown, AppState, CarListing, Quote, ShippingRates, ShippingOption},
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
            vehicle_card::{CardError, VehicleCardView},
        },
        theme,
    },
    util::{format::format_yen, version::BOT_NAME},
};

#[component]
pub fn InventoryPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let (visible, total_count, makes, filter, shipping, rates, note) = state.with(|st| {
        (
            st.visible_inventory(),
            st.inventory.len(),
            st.makes(),
            st.filter.clone(),
            st.shipping,
            st.rates.clone(),
            st.inventory_note.clone(),
        )
    });

    let lowest = lowest_total(&visible, shipping, &rates)
        .map(format_yen)
        .unwrap_or_else(|| "—".to_string());

    let cards = visible
        .iter()
        .enumerate()
        .map(|(index, car)| {
            let key = car.id.clone().unwrap_or_else(|| format!("row-{index}"));
            let result = build_card(car, shipping, &rates).map_err(|err| {
                error!(%err, "vehicle card not rendered");
                err.to_string()
            });
            (key, result)
        })
        .collect::<Vec<_>>();

    let on_ask = EventHandler::new(move |id: String| {
        let car = state.with(|st| {
            st.inventory
                .iter()
                .find(|car| car.id.as_deref() == Some(id.as_str()))
                .cloned()
        });
        match car {
            Some(car) => {
                state.with_mut(|st| st.start_chat(car, BOT_NAME));
                nav.push(Route::Assistant {});
            }
            None => push_toast(toasts, ToastKind::Error, "That vehicle is no longer listed."),
        }
    });

    let selected_make = filter.make.clone().unwrap_or_default();

    rsx! {
        div {
            header {
                class: "page-header",
                div {
                    h2 { "Vehicles in stock" }
                    p { "{note}" }
                }
                div {
                    class: "filters",
                    select {
                        class: theme::INPUT,
                        value: "{selected_make}",
                        onchange: move |evt| {
                            let make = evt.value();
                            state.with_mut(|st| {
                                st.filter.make = if make.is_empty() { None } else { Some(make) };
                            });
                        },
                        option { value: "", "All makes" }
                        for make in makes {
                            option { value: "{make}", "{make}" }
                        }
                    }
                    input {
                        class: theme::INPUT,
                        placeholder: "Search model or ID",
                        value: "{filter.query}",
                        oninput: move |evt| state.with_mut(|st| st.filter.query = evt.value()),
                    }
                }
            }

            section {
                class: "kpi-row",
                KpiCard {
                    title: "Vehicles shown".to_string(),
                    value: format!("{} / {}", visible.len(), total_count),
                    description: None,
                }
                KpiCard {
                    title: format!("Lowest {shipping} total"),
                    value: lowest,
                    description: Some(shipping.description().to_string()),
                }
            }

            if cards.is_empty() {
                p { class: "empty", "No vehicles match the current filters." }
            } else {
                div {
                    class: "card-grid",
                    for (key, result) in cards {
                        match result {
                            Ok(card) => rsx! {
                                VehicleCardView { key: "{key}", card, on_ask }
                            },
                            Err(message) => rsx! {
                                CardError { key: "{key}", message }
                            },
                        }
                    }
                }
            }
        }
    }
}

/// Cheapest priced total among `cars`; listings that cannot be quoted are skipped.
fn lowest_total(cars: &[CarListing], shipping: ShippingOption, rates: &ShippingRates) -> Option<f64> {
    cars.iter()
        .filter_map(|car| car.price)
        .map(|price| compute_breakdown(price, shipping, rates))
        .filter(Quote::is_priced)
        .map(|quote| quote.breakdown().total_price)
        .fold(None, |best: Option<f64>, total| {
            Some(best.map_or(total, |b| b.min(total)))
        })
}
