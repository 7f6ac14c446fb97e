//! # Core Engine Module
//!
//! Shared configuration and the service handle lent to systems and
//! collision callbacks.

pub mod config;
pub mod services;

pub use config::{Config, ConfigError, SimulationConfig, StoreKind, Tuning};
pub use services::Services;
