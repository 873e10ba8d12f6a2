// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use dirseed_config::ConfigError;
use dirseed_directory::DirectoryError;
use dirseed_reconcile::{ErrorKind, ReconcileError};

/// Anything that ends a `dirseed` run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
	#[error(transparent)]
	Configuration(#[from] ConfigError),

	#[error("failed to read admin password file {}: {source}", .path.display())]
	AdminPassword {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("authentication failed: {0}")]
	Authentication(#[source] DirectoryError),

	#[error(transparent)]
	Reconcile(#[from] ReconcileError),
}

/// Failure classes, each with its own process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
	Configuration,
	Authentication,
	Mutation,
	Resolution,
	Query,
}

impl FailureKind {
	pub fn exit_code(self) -> u8 {
		match self {
			FailureKind::Configuration => 2,
			FailureKind::Authentication => 3,
			FailureKind::Mutation => 4,
			FailureKind::Resolution => 5,
			FailureKind::Query => 6,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			FailureKind::Configuration => "configuration",
			FailureKind::Authentication => "authentication",
			FailureKind::Mutation => "mutation",
			FailureKind::Resolution => "resolution",
			FailureKind::Query => "query",
		}
	}
}

impl fmt::Display for FailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl SeedError {
	pub fn kind(&self) -> FailureKind {
		match self {
			SeedError::Configuration(_) | SeedError::AdminPassword { .. } => {
				FailureKind::Configuration
			}
			SeedError::Authentication(_) => FailureKind::Authentication,
			SeedError::Reconcile(err) => match err.kind() {
				ErrorKind::Mutation => FailureKind::Mutation,
				ErrorKind::Resolution => FailureKind::Resolution,
				ErrorKind::Query => FailureKind::Query,
			},
		}
	}

	pub fn exit_code(&self) -> u8 {
		self.kind().exit_code()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exit_codes_by_kind() {
		let config = SeedError::from(ConfigError::empty_field("web_url"));
		assert_eq!(config.exit_code(), 2);
		assert_eq!(config.to_string(), "web_url not set");

		let auth = SeedError::Authentication(DirectoryError::Login {
			username: "admin".into(),
			message: "HTTP 401".into(),
		});
		assert_eq!(auth.kind(), FailureKind::Authentication);
		assert_eq!(auth.exit_code(), 3);
		assert_eq!(
			auth.to_string(),
			"authentication failed: login as 'admin' failed: HTTP 401"
		);

		let unresolved = SeedError::from(ReconcileError::UnresolvedGroup {
			user: "alice".into(),
			group: "ghosts".into(),
		});
		assert_eq!(unresolved.kind(), FailureKind::Resolution);
		assert_eq!(unresolved.exit_code(), 5);
	}
}
