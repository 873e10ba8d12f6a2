// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Semantic checks applied after a seed document parses.

use std::collections::HashSet;

use url::Url;

use crate::{ConfigError, SeedConfig};

impl SeedConfig {
	/// Reject documents the engine cannot act on.
	///
	/// Group references in `users[].groups` are not checked here: they may name
	/// groups that already exist in the directory without being seeded.
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (field, value) in [
			("admin_username", &self.admin_username),
			("ldap_url", &self.ldap_url),
			("web_url", &self.web_url),
			("base_dn", &self.base_dn),
		] {
			if value.is_empty() {
				return Err(ConfigError::empty_field(field));
			}
		}

		match Url::parse(&self.web_url) {
			Ok(url) if matches!(url.scheme(), "http" | "https") => {}
			Ok(url) => {
				return Err(ConfigError::validation(format!(
					"web_url must be an http or https URL, got scheme '{}'",
					url.scheme()
				)))
			}
			Err(e) => {
				return Err(ConfigError::validation(format!(
					"web_url '{}' is not a valid URL: {e}",
					self.web_url
				)))
			}
		}

		if self.seed.is_empty() {
			return Err(ConfigError::empty_field("seed"));
		}

		if self.seed.groups.iter().any(String::is_empty) {
			return Err(ConfigError::validation("group names must not be empty"));
		}

		let mut seen = HashSet::new();
		for (index, user) in self.seed.users.iter().enumerate() {
			if user.id.is_empty() {
				return Err(ConfigError::empty_field(format!("seed.users[{index}].id")));
			}
			for (field, empty) in [
				("email", user.email.is_empty()),
				("displayName", user.display_name.is_empty()),
				("password_file", user.password_file.as_os_str().is_empty()),
			] {
				if empty {
					return Err(ConfigError::empty_field(format!(
						"seed.users[{index}].{field} ({})",
						user.id
					)));
				}
			}
			if user.groups.iter().any(String::is_empty) {
				return Err(ConfigError::validation(format!(
					"user '{}' references an empty group name",
					user.id
				)));
			}
			if !seen.insert(user.id.as_str()) {
				return Err(ConfigError::validation(format!(
					"user '{}' is listed more than once",
					user.id
				)));
			}
		}

		Ok(())
	}
}
