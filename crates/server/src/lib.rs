//! Keygate API Library
//!
//! This crate contains the authentication server components for Keygate.

pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use service::AuthService;
pub use state::AppState;
