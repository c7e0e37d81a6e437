//! Business logic services layer

pub mod auth_service;
pub mod plot_service;

pub use auth_service::AuthService;
