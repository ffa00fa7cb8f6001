/// Database connection and schema creation
pub mod database;

/// Store location resolution from the environment and `rescue.toml`
pub mod store;

pub use store::StoreLocation;
