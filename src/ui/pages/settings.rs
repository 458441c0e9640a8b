use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    config::DeskConfig,
    domain::{AppState, ShippingRates},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::{format::format_rate, version::version_label},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<DeskConfig>();

    let (initial_rates, seller, note) =
        state.with(|st| (st.rates.clone(), st.seller.clone(), st.inventory_note.clone()));

    let mut transport_input = use_signal(|| format!("{:.0}", initial_rates.domestic_transport));
    let mut freight_input = use_signal(|| format!("{:.0}", initial_rates.freight_cost));
    let mut insurance_input = use_signal(|| percent_text(initial_rates.insurance_rate));

    let on_apply = {
        let mut state = state;
        move |_| match parse_rates(transport_input(), freight_input(), insurance_input()) {
            Ok(rates) => {
                let label = format_rate(rates.insurance_rate);
                state.with_mut(|st| st.rates = rates);
                persist_user_state(&state);
                push_toast(
                    toasts,
                    ToastKind::Success,
                    format!("Updated shipping rates (insurance {label})."),
                );
            }
            Err(message) => push_toast(toasts, ToastKind::Error, message),
        }
    };

    let on_reset = {
        let mut state = state;
        let defaults = config.default_rates.clone();
        move |_| {
            transport_input.set(format!("{:.0}", defaults.domestic_transport));
            freight_input.set(format!("{:.0}", defaults.freight_cost));
            insurance_input.set(percent_text(defaults.insurance_rate));
            state.with_mut(|st| st.rates = defaults.clone());
            persist_user_state(&state);
            push_toast(toasts, ToastKind::Info, "Restored default shipping rates.");
        }
    };

    rsx! {
        div {
            section {
                class: theme::PANEL,
                h2 { "Shipping rates" }
                p { "Flat charges in yen per vehicle; insurance is a share of the vehicle price." }
                div {
                    class: "form-grid",
                    div {
                        class: "field",
                        label { "Domestic transport (¥)" }
                        input {
                            class: theme::INPUT,
                            value: transport_input(),
                            oninput: move |evt| transport_input.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { "Ocean freight (¥)" }
                        input {
                            class: theme::INPUT,
                            value: freight_input(),
                            oninput: move |evt| freight_input.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { "Marine insurance (%)" }
                        input {
                            class: theme::INPUT,
                            value: insurance_input(),
                            oninput: move |evt| insurance_input.set(evt.value()),
                        }
                    }
                }
                div {
                    class: "actions",
                    button { class: theme::BTN_PRIMARY, onclick: on_apply, "Apply" }
                    button { class: theme::BTN, onclick: on_reset, "Reset defaults" }
                }
            }

            section {
                class: theme::PANEL,
                h2 { "Inventory" }
                p { "{note}" }
            }

            section {
                class: theme::PANEL,
                h2 { "Seller" }
                p { strong { "{seller.name}" } }
                p { "{seller.address}" }
                p { "{seller.phone} · {seller.email}" }
                p { class: "price-caption", "{version_label()}" }
            }
        }
    }
}

fn percent_text(rate: f64) -> String {
    format_rate(rate).trim_end_matches('%').to_string()
}

/// Parses the three rate inputs; insurance is entered as a percentage.
fn parse_rates(
    domestic_transport: String,
    freight_cost: String,
    insurance_pct: String,
) -> Result<ShippingRates, String> {
    let domestic_transport: f64 = parse_amount(&domestic_transport)
        .ok_or("Domestic transport must be a number")?;
    let freight_cost: f64 =
        parse_amount(&freight_cost).ok_or("Ocean freight must be a number")?;
    let insurance_pct: f64 = insurance_pct
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| "Insurance must be a percentage such as 2 or 2.5")?;

    let rates = ShippingRates {
        domestic_transport,
        freight_cost,
        insurance_rate: insurance_pct / 100.0,
    };
    rates.validate().map_err(|err| err.to_string())?;
    Ok(rates)
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('¥')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    cleaned.parse().ok().filter(|value: &f64| value.is_finite())
}
