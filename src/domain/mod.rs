//! Pricing, listing and sales-conversation logic lives here.

pub mod app_state;
pub mod assistant;
pub mod card;
pub mod catalog;
pub mod entities;
pub mod shipping;

pub use app_state::{AppState, InventoryFilter, PersistedState};
pub use assistant::{respond, AssistantReply, ChatMessage, ChatSession, Speaker};
pub use card::{build_card, CostLine, RenderError, VehicleCard};
pub use entities::{CarListing, CustomerInfo, Mileage, SellerInfo};
pub use shipping::{
    compute_breakdown, PriceBreakdown, Quote, QuoteError, RatesError, ShippingOption, ShippingRates,
};
