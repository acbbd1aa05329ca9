pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod provider;
pub mod secret;
pub mod validation;
