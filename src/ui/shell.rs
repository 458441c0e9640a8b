use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::{AppState, ShippingOption},
    ui::theme,
    util::{
        assets,
        version::{version_label, APP_NAME},
    },
};

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let (shipping, seller, chatting) =
        state.with(|st| (st.shipping, st.seller.clone(), st.chat.car.is_some()));
    let assistant_label: &'static str = if chatting { "Assistant •" } else { "Assistant" };

    rsx! {
        div {
            class: "app-shell",
            header {
                class: theme::header_class(shipping),
                div {
                    class: "brand",
                    img { src: assets::logo_data_uri(), alt: "{seller.name} logo", height: "36" }
                    div {
                        h1 { "{APP_NAME}" }
                        p { class: "tagline", "{shipping.description()}" }
                    }
                }

                // Incoterm applied to every price on screen.
                div {
                    class: "option-switch",
                    for option in ShippingOption::ALL {
                        OptionButton {
                            option,
                            active: option == shipping,
                            onclick: move |_| {
                                let mut state = state;
                                state.with_mut(|st| st.shipping = option);
                                persist_user_state(&state);
                            },
                        }
                    }
                }

                nav {
                    class: "nav",
                    NavButton {
                        active: matches!(current_route, Route::Inventory {}),
                        onclick: move |_| { nav.push(Route::Inventory {}); },
                        label: "Inventory",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Assistant {}),
                        onclick: move |_| { nav.push(Route::Assistant {}); },
                        label: assistant_label,
                    }
                    NavButton {
                        active: matches!(current_route, Route::Settings {}),
                        onclick: move |_| { nav.push(Route::Settings {}); },
                        label: "Settings",
                    }
                }
            }
            main {
                {children}
            }
            footer {
                class: "app-footer",
                span { "{seller.name} · {seller.address} · {seller.phone} · {seller.email}" }
                span { "{version_label()}" }
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
fn OptionButton(option: ShippingOption, active: bool, onclick: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: theme::option_button(active),
            title: option.description(),
            onclick: move |_| onclick.call(()),
            "{option.label()}"
        }
    }
}
