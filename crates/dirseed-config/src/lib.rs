// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Desired-state configuration for dirseed.
//!
//! This crate provides:
//! - The seed document model ([`SeedConfig`], [`Seed`], [`UserSpec`])
//! - JSON loading with validation of required fields
//! - Default file locations and their environment overrides

pub mod error;
pub mod paths;
pub mod seed;
mod validation;

pub use error::ConfigError;
pub use paths::{
	ensure_readable_file, ADMIN_PASSWORD_ENV, CONFIG_FILE_ENV, DEFAULT_ADMIN_PASSWORD_FILE,
	DEFAULT_CONFIG_FILE,
};
pub use seed::{Seed, SeedConfig, UserSpec};
