// Social Feed - blogging backend with groups, comments and a follow graph

// Core types and primitives
pub mod core;

// Domain models
pub mod models;

// Infrastructure - storage and request plumbing
pub mod infrastructure;

// Feed, post and follow-graph services
pub mod services;

// HTTP interface
pub mod api;

// Common utilities
pub mod app_state;
pub mod config;
pub mod data_seeder;
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
