pub mod config_manager;
pub mod endpoint;
pub mod exporters;
pub mod logging;
pub mod sender;
pub mod storage;

pub use sender::TelemetrySender;
