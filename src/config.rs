//! Startup configuration: seller identity, inventory source and the shipping
//! rates new installs begin with.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::{
    domain::{SellerInfo, ShippingRates},
    infra::inventory::InventoryConfig,
};

pub const APP_QUALIFIER: &str = "ai";
pub const APP_ORG: &str = "Otoz";
pub const APP_DIR_NAME: &str = "ExportDesk";

#[derive(Clone, Debug, PartialEq)]
pub struct DeskConfig {
    pub seller: SellerInfo,
    pub inventory: InventoryConfig,
    pub default_rates: ShippingRates,
    pub invoice_dir: PathBuf,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            seller: SellerInfo::default(),
            inventory: InventoryConfig::default(),
            default_rates: ShippingRates::default(),
            invoice_dir: PathBuf::from("invoices"),
        }
    }
}

impl DeskConfig {
    pub fn from_env() -> Self {
        Self {
            inventory: InventoryConfig::from_env(),
            invoice_dir: project_dirs()
                .map(|dirs| dirs.data_dir().join("invoices"))
                .unwrap_or_else(|| PathBuf::from("invoices")),
            ..Self::default()
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_DIR_NAME)
}
