pub mod assistant;
pub mod inventory;
pub mod settings;

pub use assistant::AssistantPage;
pub use inventory::InventoryPage;
pub use settings::SettingsPage;
