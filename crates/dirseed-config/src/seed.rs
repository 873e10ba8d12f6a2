// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The seed document: connection coordinates plus the desired groups and users.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::paths::ensure_readable_file;
use crate::ConfigError;

/// Top-level seed document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
	/// Directory administrator used for the web login and the password tool bind.
	pub admin_username: String,
	/// Directory protocol endpoint, e.g. `ldap://lldap:3890`.
	pub ldap_url: String,
	/// Query-API base URL, e.g. `http://lldap:17170`.
	pub web_url: String,
	/// Directory naming root, e.g. `dc=example,dc=com`.
	pub base_dn: String,
	pub seed: Seed,
}

/// Desired groups and users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Seed {
	#[serde(default)]
	pub groups: Vec<String>,
	#[serde(default)]
	pub users: Vec<UserSpec>,
}

/// A user that must exist after the run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
	pub id: String,
	pub email: String,
	pub display_name: String,
	/// Names of the groups the user is added to at creation time.
	#[serde(default)]
	pub groups: Vec<String>,
	/// One-shot file holding the user's initial password.
	#[serde(rename = "password_file")]
	pub password_file: PathBuf,
	#[serde(default)]
	pub first_name: Option<String>,
	#[serde(default)]
	pub last_name: Option<String>,
}

impl SeedConfig {
	/// Load and validate a seed document from a JSON file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		ensure_readable_file("Configuration", path)?;

		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_json(path, &content)?;

		tracing::debug!(
			path = %path.display(),
			groups = config.seed.groups.len(),
			users = config.seed.users.len(),
			"loaded seed configuration"
		);

		Ok(config)
	}

	/// Parse and validate a seed document. `path` is only used in errors.
	pub fn from_json(path: &Path, content: &str) -> Result<Self, ConfigError> {
		let config: SeedConfig =
			serde_json::from_str(content).map_err(|source| ConfigError::JsonParse {
				path: path.to_path_buf(),
				source,
			})?;
		config.validate()?;
		Ok(config)
	}
}

impl Seed {
	/// The desired group set, in the order groups are reconciled.
	pub fn desired_groups(&self) -> BTreeSet<&str> {
		self.groups.iter().map(String::as_str).collect()
	}

	/// Desired users in ascending id order.
	pub fn users_sorted(&self) -> Vec<&UserSpec> {
		let mut users: Vec<&UserSpec> = self.users.iter().collect();
		users.sort_by(|a, b| a.id.cmp(&b.id));
		users
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty() && self.users.is_empty()
	}
}
