use dioxus::prelude::*;
use time::OffsetDateTime;
use tracing::error;

use crate::{
    app::{persist_user_state, Route},
    config::DeskConfig,
    domain::{
        build_card, catalog, respond, AppState, AssistantReply, CustomerInfo, Speaker,
    },
    infra::invoice::{write_invoice, InvoiceRequest},
    ui::{
        components::{
            breakdown_panel::BreakdownPanel,
            toast::{push_toast, ToastKind, ToastMessage},
            vehicle_card::CardError,
        },
        theme,
    },
};

#[component]
pub fn AssistantPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<DeskConfig>();
    let nav = use_navigator();
    let mut draft = use_signal(String::new);

    let (car, messages, customer, shipping, rates, offer_status) = state.with(|st| {
        (
            st.chat.car.clone(),
            st.chat.messages.clone(),
            st.customer.clone(),
            st.shipping,
            st.rates.clone(),
            st.chat.offer_status(),
        )
    });

    let Some(car) = car else {
        return rsx! {
            div {
                class: "panel",
                p { class: "empty", "Pick a vehicle from the inventory to start a conversation." }
                button {
                    class: theme::BTN_PRIMARY,
                    onclick: move |_| { nav.push(Route::Inventory {}); },
                    "Browse inventory"
                }
            }
        };
    };

    let summary = build_card(&car, shipping, &rates);

    let on_send = move |evt: FormEvent| {
        evt.prevent_default();
        let input = draft().trim().to_string();
        if input.is_empty() {
            return;
        }
        draft.set(String::new());

        let reply = state.with_mut(|st| {
            st.chat.push(Speaker::Customer, input.clone());
            let shipping = st.shipping;
            let rates = st.rates.clone();
            let reply = respond(&mut st.chat, &input, shipping, &rates);
            if let Some(text) = reply.text() {
                st.chat.push(Speaker::Assistant, text);
            }
            st.customer = st.chat.customer.clone();
            reply
        });
        persist_user_state(&state);

        match reply {
            AssistantReply::Reset => {
                push_toast(toasts, ToastKind::Info, "Conversation cleared. Pick another vehicle.");
                nav.push(Route::Inventory {});
            }
            AssistantReply::GenerateInvoice(_) => issue_invoice(state, toasts, &config),
            AssistantReply::Message(_) => {}
        }
    };

    let ports = customer
        .country
        .as_deref()
        .map(catalog::ports_for)
        .unwrap_or(&[]);
    let selected_country = customer.country.clone().unwrap_or_default();
    let selected_port = customer.port_of_discharge.clone().unwrap_or_default();

    rsx! {
        div {
            class: "chat-layout",
            aside {
                class: "panel",
                match summary {
                    Ok(card) => rsx! {
                        h3 { "{card.title}" }
                        p { class: "price-caption", "Total price" }
                        p { class: "price-total", "{card.total_price}" }
                        span { class: theme::option_badge(card.shipping), "{card.shipping}" }
                        if let Some(status) = offer_status {
                            span { class: "badge badge-offer", "{status}" }
                        }
                        if let Some(warning) = card.quote_warning.clone() {
                            p { class: "warning", "{warning}" }
                        }
                        BreakdownPanel {
                            lines: card.lines.clone(),
                            total: card.total_price.clone(),
                            shipping: card.shipping,
                        }
                    },
                    Err(err) => rsx! { CardError { message: err.to_string() } },
                }

                h3 { "Destination" }
                div {
                    class: "field",
                    label { "Country" }
                    select {
                        class: theme::INPUT,
                        value: "{selected_country}",
                        onchange: move |evt| {
                            let country = evt.value();
                            update_customer(state, |customer| {
                                customer.country = (!country.is_empty()).then(|| country.clone());
                                customer.port_of_discharge = None;
                            });
                        },
                        option { value: "", "Select a country" }
                        for country in catalog::countries() {
                            option { value: "{country}", "{country}" }
                        }
                    }
                }
                div {
                    class: "field",
                    label { "Port of discharge" }
                    select {
                        class: theme::INPUT,
                        value: "{selected_port}",
                        disabled: ports.is_empty(),
                        onchange: move |evt| {
                            let port = evt.value();
                            update_customer(state, |customer| {
                                customer.port_of_discharge = (!port.is_empty()).then(|| port.clone());
                            });
                        },
                        option { value: "", "Select a port" }
                        for port in ports.iter() {
                            option { value: "{port}", "{port}" }
                        }
                    }
                }

                h3 { "Your details" }
                ContactField {
                    label: "Name",
                    value: customer.name.clone(),
                    on_change: move |value: String| update_customer(state, |c| c.name = value.clone()),
                }
                ContactField {
                    label: "Email",
                    value: customer.email.clone(),
                    on_change: move |value: String| update_customer(state, |c| c.email = value.clone()),
                }
                ContactField {
                    label: "Phone",
                    value: customer.phone.clone(),
                    on_change: move |value: String| update_customer(state, |c| c.phone = value.clone()),
                }
            }

            section {
                class: "panel",
                h3 { "Chat" }
                div {
                    class: "chat-log",
                    for message in messages {
                        div {
                            class: match message.speaker {
                                Speaker::Customer => "chat-msg customer",
                                Speaker::Assistant => "chat-msg assistant",
                            },
                            "{message.text}"
                        }
                    }
                }
                form {
                    class: "chat-form",
                    onsubmit: on_send,
                    input {
                        class: theme::INPUT,
                        placeholder: "Ask about price, payment or an invoice…",
                        value: draft(),
                        oninput: move |evt| draft.set(evt.value()),
                    }
                    button { class: theme::BTN_PRIMARY, r#type: "submit", "Send" }
                }
                div {
                    class: "actions",
                    button {
                        class: theme::BTN,
                        onclick: move |_| {
                            state.with_mut(|st| st.chat.reset());
                            nav.push(Route::Inventory {});
                        },
                        "Choose another car"
                    }
                }
            }
        }
    }
}

#[component]
fn ContactField(label: &'static str, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "field",
            label { "{label}" }
            input {
                class: theme::INPUT,
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
            }
        }
    }
}

/// Applies `edit` to the customer record and to the open chat, then saves.
fn update_customer(mut state: Signal<AppState>, edit: impl FnOnce(&mut CustomerInfo)) {
    state.with_mut(|st| {
        edit(&mut st.customer);
        st.chat.customer = st.customer.clone();
    });
    persist_user_state(&state);
}

fn issue_invoice(state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>, config: &DeskConfig) {
    let result = state.with(|st| {
        let car = st.chat.car.as_ref()?;
        let request = InvoiceRequest {
            seller: &st.seller,
            car,
            customer: &st.customer,
            shipping: st.shipping,
            rates: &st.rates,
            date: OffsetDateTime::now_utc().date(),
        };
        Some(write_invoice(&config.invoice_dir, &request))
    });

    match result {
        Some(Ok(path)) => push_toast(
            toasts,
            ToastKind::Success,
            format!("Proforma invoice saved to {}", path.display()),
        ),
        Some(Err(err)) => {
            error!(%err, "invoice generation failed");
            push_toast(toasts, ToastKind::Error, format!("Could not create the invoice: {err}"));
        }
        None => push_toast(toasts, ToastKind::Warning, "No vehicle selected for the invoice."),
    }
}
