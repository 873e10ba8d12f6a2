// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
	#[error("invalid directory URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("login as '{username}' failed: {message}")]
	Login { username: String, message: String },

	#[error("{operation} returned HTTP {status}: {body}")]
	Status {
		operation: &'static str,
		status: u16,
		body: String,
	},

	#[error("{operation} failed: {}; response: {raw}", .messages.join("; "))]
	Graphql {
		operation: &'static str,
		messages: Vec<String>,
		raw: String,
	},

	#[error("{operation} response had no data: {raw}")]
	MissingData { operation: &'static str, raw: String },

	#[error("{operation} was rejected by the directory")]
	Rejected { operation: &'static str },

	#[error("failed to parse {operation} response: {source}")]
	Parse {
		operation: &'static str,
		#[source]
		source: serde_json::Error,
	},
}
