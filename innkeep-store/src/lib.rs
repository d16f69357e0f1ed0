pub mod app_config;
pub mod database;
pub mod events;
pub mod supervisor;

pub use database::Database;
pub use events::EventProducer;
