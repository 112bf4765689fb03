//! College admission advisor API
//!
//! Recommends institutions to an examinee from their provincial exam rank,
//! historical admission ranks and stated preferences.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::{create_router, AppState};
