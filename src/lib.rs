pub mod app;
pub mod authz;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod scenario;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used items for tests
pub use app::{create_app, AppState};
pub use store::InMemoryStore;
