pub mod config;
pub mod driver;
pub mod http;
pub mod models;
pub mod poller;
pub mod presence;
pub mod record;
pub mod registry;
pub mod workstation;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
