mod main_config;

pub use main_config::{Config, get_config_manager};
