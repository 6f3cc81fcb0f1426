//! API module
//!
//! Contains HTTP request handlers for the product catalog endpoints

pub mod products;
