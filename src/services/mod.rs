pub mod price_lookup;
pub mod live_trading;
pub mod finnhub;
pub mod notifier;

pub mod alert_store;
pub mod alert_monitor;
pub mod alerts_service;
