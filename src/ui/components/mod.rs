pub mod breakdown_panel;
pub mod kpi_card;
pub mod toast;
pub mod vehicle_card;
