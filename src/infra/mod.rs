pub mod inventory;
pub mod invoice;
