//! # tarrs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: Loading, merging, and validating the TOML defaults
//! - `error`: The `TarrsError` taxonomy and the `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, TarrsError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
