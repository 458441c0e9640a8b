use dioxus::prelude::*;

use crate::domain::{CostLine, ShippingOption};

/// Collapsible itemisation of a quote, closed by default.
#[component]
pub fn BreakdownPanel(lines: Vec<CostLine>, total: String, shipping: ShippingOption) -> Element {
    rsx! {
        details {
            class: "breakdown",
            summary { "Price breakdown ({shipping})" }
            for line in lines {
                div {
                    class: "breakdown-line",
                    span { "{line.label}" }
                    span { "{line.amount}" }
                }
            }
            div {
                class: "breakdown-line total",
                span { "Total" }
                span { "{total}" }
            }
        }
    }
}
