pub const APP_NAME: &str = "Export Desk";
pub const BOT_NAME: &str = "Sparky";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn page_title() -> String {
    format!("{BOT_NAME} - AI Sales Assistant")
}

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}
