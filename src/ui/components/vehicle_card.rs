use dioxus::prelude::*;

use super::breakdown_panel::BreakdownPanel;
use crate::domain::VehicleCard;
use crate::ui::theme;

#[component]
pub fn VehicleCardView(card: VehicleCard, on_ask: EventHandler<String>) -> Element {
    let ask_id = card.id.clone();
    let meta = [
        ("Location", card.location.clone()),
        ("Mileage", card.mileage.clone()),
        ("Color", card.color.clone()),
        ("Transmission", card.transmission.clone()),
        ("Fuel", card.fuel.clone()),
        ("Grade", card.grade.clone()),
    ];

    rsx! {
        article {
            class: "vehicle-card",
            if let Some(url) = card.image_url.clone() {
                img { src: "{url}", alt: "{card.title}" }
            }
            div {
                class: "card-body",
                div {
                    h3 { class: "card-title", "{card.title}" }
                    span { class: "card-id", "ID: {card.id}" }
                }
                dl {
                    class: "card-meta",
                    for (label, value) in meta {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
                div {
                    p { class: "price-caption", "Total price" }
                    p { class: "price-total", "{card.total_price}" }
                    span { class: theme::option_badge(card.shipping), "{card.shipping}" }
                }
                if let Some(warning) = card.quote_warning.clone() {
                    p { class: "warning", "{warning}" }
                }
                BreakdownPanel {
                    lines: card.lines.clone(),
                    total: card.total_price.clone(),
                    shipping: card.shipping,
                }
                button {
                    class: theme::BTN_PRIMARY,
                    onclick: move |_| on_ask.call(ask_id.clone()),
                    "Ask about this car"
                }
            }
        }
    }
}

/// Shown in place of a card that could not be built.
#[component]
pub fn CardError(message: String) -> Element {
    rsx! {
        div {
            class: "card-error",
            strong { "Could not display this vehicle. " }
            "{message}"
        }
    }
}
