//! Incoterm-specific class helpers for consistent styling across pages.
//! Class names resolve against `assets/main.css`.

use crate::domain::ShippingOption;

// ============================================
// ACCENTS
// ============================================

pub fn header_class(shipping: ShippingOption) -> &'static str {
    match shipping {
        ShippingOption::ExWorks => "app-header accent-exw",
        ShippingOption::Fob => "app-header accent-fob",
        ShippingOption::Cnf => "app-header accent-cnf",
        ShippingOption::Cif => "app-header accent-cif",
    }
}

pub fn option_badge(shipping: ShippingOption) -> &'static str {
    match shipping {
        ShippingOption::ExWorks => "badge badge-exw",
        ShippingOption::Fob => "badge badge-fob",
        ShippingOption::Cnf => "badge badge-cnf",
        ShippingOption::Cif => "badge badge-cif",
    }
}

// ============================================
// BUTTONS
// ============================================

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-btn active"
    } else {
        "nav-btn"
    }
}

pub fn option_button(active: bool) -> &'static str {
    if active {
        "option-btn active"
    } else {
        "option-btn"
    }
}

pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN: &str = "btn";

// ============================================
// FORMS & PANELS
// ============================================

pub const INPUT: &str = "input";
pub const PANEL: &str = "panel";
