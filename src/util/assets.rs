use std::{borrow::Cow, sync::OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_embed::RustEmbed;
use tracing::error;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static LOGO_DATA_URI: OnceLock<String> = OnceLock::new();

/// Contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// Data URI for the seller logo, also used as the window icon in the page head.
pub fn logo_data_uri() -> &'static str {
    LOGO_DATA_URI
        .get_or_init(|| load_data_uri("logo.svg"))
        .as_str()
}

fn load_text(path: &str) -> String {
    match load_asset(path) {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => String::new(),
    }
}

fn load_data_uri(path: &str) -> String {
    let Some(bytes) = load_asset(path) else {
        return String::new();
    };
    format!("data:{};base64,{}", guess_mime(path), STANDARD.encode(bytes.as_ref()))
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let asset = EmbeddedAssets::get(path.trim_start_matches('/')).map(|file| file.data);
    if asset.is_none() {
        error!(path, "embedded asset missing");
    }
    asset
}

fn guess_mime(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else if path.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_stylesheet_and_logo() {
        assert!(main_css().contains(".vehicle-card"));
        assert!(logo_data_uri().starts_with("data:image/svg+xml;base64,"));
    }
}
