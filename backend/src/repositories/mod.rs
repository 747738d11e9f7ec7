pub mod activity_log;
pub mod assignment;
pub mod common;
pub mod credential;
pub mod general_inventory;
pub mod hardware;
pub mod item_status;
pub mod network_device;
pub mod repository;
pub mod transaction;
pub mod vlan;

pub use assignment::AssignmentRepository;
pub use credential::CredentialRepository;
pub use general_inventory::GeneralInventoryRepository;
pub use hardware::HardwareRepository;
pub use network_device::NetworkDeviceRepository;
pub use repository::{ItemRepository, Repository};
pub use transaction::*;
pub use vlan::VlanRepository;
