use std::sync::atomic::{AtomicUsize, Ordering};

pub mod assets;
pub mod format;
pub mod logging;
pub mod persistence;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Process-unique id for transient UI items such as toasts.
pub fn next_ui_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

#[cfg(test)]
mod tests {
    use super::next_ui_id;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let first = next_ui_id("toast");
        let second = next_ui_id("toast");
        assert!(first.starts_with("toast-"));
        assert_ne!(first, second);
    }
}
