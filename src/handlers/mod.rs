pub mod config;
pub mod health;
pub mod resolve;

pub use config::{config_handler, direct_handler, request_handler};
pub use health::health_handler;
pub use resolve::resolve_handler;
