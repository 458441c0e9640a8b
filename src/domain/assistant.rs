//! Keyword-driven sales assistant for the vehicle a customer is asking about.
//!
//! The assistant first collects the destination (country, then port of
//! discharge), then answers invoice, payment and price questions. Anything
//! else is handed over to a human representative.

use super::{
    catalog::{match_country, match_port, ports_for},
    entities::{CarListing, CustomerInfo},
    shipping::{compute_breakdown, ShippingOption, ShippingRates},
};
use crate::util::format::format_yen;

const RESET_KEYWORDS: &[&str] = &["another car", "start over", "change car", "go back"];
const CONFIRM_KEYWORDS: &[&str] = &["yes", "proceed", "confirm", "i agree"];
const PAYMENT_KEYWORDS: &[&str] = &["payment", "pay", "bank"];
const PRICE_KEYWORDS: &[&str] = &["price", "discount", "negotiate", "offer"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    Customer,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    pub car: Option<CarListing>,
    pub customer: CustomerInfo,
    pub messages: Vec<ChatMessage>,
    /// The assistant asked the customer to confirm an invoice.
    pub invoice_request_pending: bool,
    /// The customer mentioned an offer; sales reviews it by hand.
    pub offer_placed: bool,
}

impl ChatSession {
    pub fn start(car: CarListing, customer: CustomerInfo) -> Self {
        Self {
            car: Some(car),
            customer,
            ..Self::default()
        }
    }

    /// Drops the conversation and the vehicle, keeping customer details.
    pub fn reset(&mut self) {
        self.car = None;
        self.messages.clear();
        self.invoice_request_pending = false;
        self.offer_placed = false;
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            speaker,
            text: text.into(),
        });
    }

    /// Status shown next to the quote once the customer has made an offer.
    pub fn offer_status(&self) -> Option<&'static str> {
        self.offer_placed.then_some("Offer under review")
    }

    /// Opening line once a vehicle is picked.
    pub fn greeting(&self, bot_name: &str) -> String {
        let car_name = self
            .car
            .as_ref()
            .map(CarListing::display_name)
            .unwrap_or_else(|| "this vehicle".to_string());
        format!("Hi, I'm {bot_name}! Happy to help you with the {car_name}. Ask me about the price, payment or an invoice.")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssistantReply {
    Message(String),
    /// The customer wants to pick a different vehicle; the session was reset.
    Reset,
    /// The customer confirmed; an invoice should be issued now.
    GenerateInvoice(String),
}

impl AssistantReply {
    pub fn text(&self) -> Option<&str> {
        match self {
            AssistantReply::Message(text) | AssistantReply::GenerateInvoice(text) => Some(text),
            AssistantReply::Reset => None,
        }
    }
}

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

pub fn respond(
    session: &mut ChatSession,
    input: &str,
    shipping: ShippingOption,
    rates: &ShippingRates,
) -> AssistantReply {
    let lowered = input.to_lowercase();

    if mentions(&lowered, RESET_KEYWORDS) {
        session.reset();
        return AssistantReply::Reset;
    }

    let was_pending = std::mem::take(&mut session.invoice_request_pending);

    let Some(country) = session.customer.country.clone() else {
        return match match_country(input) {
            Some(country) => {
                session.customer.country = Some(country.to_string());
                AssistantReply::Message(port_question(country))
            }
            None => AssistantReply::Message(
                "I see we haven't confirmed your destination. To which country will you be shipping the vehicle?"
                    .to_string(),
            ),
        };
    };

    if session.customer.port_of_discharge.is_none() {
        return match match_port(&country, input) {
            Some(port) => {
                session.customer.port_of_discharge = Some(port.to_string());
                AssistantReply::Message(format!(
                    "Great, we'll ship to {port}, {country}. What else would you like to know?"
                ))
            }
            None => AssistantReply::Message(format!(
                "Thanks! And which port in {country} will be the port of discharge?"
            )),
        };
    }

    if lowered.contains("invoice") {
        session.invoice_request_pending = true;
        return AssistantReply::Message(
            "Absolutely. I can prepare the proforma invoice. Just to confirm, are you ready to proceed with the purchase at the displayed price?"
                .to_string(),
        );
    }

    if was_pending && mentions(&lowered, CONFIRM_KEYWORDS) {
        return AssistantReply::GenerateInvoice(
            "Excellent! Generating your proforma invoice now; you will be told where it was saved."
                .to_string(),
        );
    }

    if mentions(&lowered, PAYMENT_KEYWORDS) {
        return AssistantReply::Message(
            "We accept wire transfers to our corporate bank account in Tokyo. The full details will be on the proforma invoice."
                .to_string(),
        );
    }

    if mentions(&lowered, PRICE_KEYWORDS) {
        if lowered.contains("offer") {
            session.offer_placed = true;
        }
        return AssistantReply::Message(price_reply(session.car.as_ref(), shipping, rates));
    }

    AssistantReply::Message(
        "That's a great question. I am forwarding it to a human sales representative who will get back to you shortly, either here in the chat or via email."
            .to_string(),
    )
}

fn port_question(country: &str) -> String {
    let ports = ports_for(country);
    if ports.is_empty() {
        format!("Thanks! And which port in {country} will be the port of discharge?")
    } else {
        format!(
            "Thanks! And which port in {country} will be the port of discharge? We ship to {}.",
            ports.join(", ")
        )
    }
}

fn price_reply(car: Option<&CarListing>, shipping: ShippingOption, rates: &ShippingRates) -> String {
    let quote = car
        .and_then(|car| car.price)
        .map(|price| compute_breakdown(price, shipping, rates));
    match quote {
        Some(quote) if quote.is_priced() => format!(
            "The current total price is {} {}. Our prices are competitive, but feel free to state your best offer for our sales team to review.",
            format_yen(quote.breakdown().total_price),
            shipping
        ),
        _ => "I can't quote this vehicle right now. A sales representative will confirm the price with you shortly."
            .to_string(),
    }
}
