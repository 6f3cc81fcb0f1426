// State management module
// Holds the in-memory catalog and the shared handle handed to handlers

pub mod app_state;
pub mod catalog;

pub use app_state::{AppState, SharedState};
pub use catalog::{CatalogState, Category, Product};
