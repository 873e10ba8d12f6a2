// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors raised before any network call is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required file is absent
	#[error("{kind} {} does not exist", .path.display())]
	NotFound { kind: &'static str, path: PathBuf },

	/// I/O error reading a file
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// JSON parsing error
	#[error("JSON parse error in {}: {source}", .path.display())]
	JsonParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// Required field present but empty
	#[error("{0} not set")]
	EmptyField(String),

	/// Validation error
	#[error("invalid seed: {0}")]
	Validation(String),
}

impl ConfigError {
	pub fn empty_field(field: impl Into<String>) -> Self {
		Self::EmptyField(field.into())
	}

	pub fn validation(msg: impl Into<String>) -> Self {
		Self::Validation(msg.into())
	}
}
