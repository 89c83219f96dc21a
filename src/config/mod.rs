//! Configuration module for SpendLens
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SpendPaths;
pub use settings::Settings;
