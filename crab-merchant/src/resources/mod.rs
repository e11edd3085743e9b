//! Resource catalogue
//!
//! One module per table: its [`Schema`](crate::db::Schema) and its
//! [`Resource`](crate::crud::Resource) rules.

pub mod automation_action;
pub mod delivery_info;
pub mod kitchen_device;
pub mod kitchen_station;
pub mod marketing_automation;
pub mod online_order;
pub mod payment_info;
pub mod qr_code;
pub mod reference;
pub mod tip_pool;
pub mod tip_pool_member;

pub use automation_action::AutomationActions;
pub use delivery_info::DeliveryInfos;
pub use kitchen_device::KitchenDevices;
pub use kitchen_station::KitchenStations;
pub use marketing_automation::MarketingAutomations;
pub use online_order::OnlineOrders;
pub use payment_info::PaymentInfos;
pub use qr_code::QrCodes;
pub use tip_pool::TipPools;
pub use tip_pool_member::TipPoolMembers;
