pub mod status_manager;

pub use status_manager::OrderStatusManager;
