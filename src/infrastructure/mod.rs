//! Infrastructure layer.
//!
//! Provides technical concerns that support the store without containing
//! persistence logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup

pub mod config;
