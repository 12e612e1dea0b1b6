pub mod a002_inventory;
pub mod a003_tracking;
pub mod a004_usage_log;
