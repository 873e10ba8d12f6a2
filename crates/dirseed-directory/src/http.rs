// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent and bounded timeouts.

use std::time::Duration;

use reqwest::Client;

/// Timeouts applied to every request made against the query API.
///
/// The engine itself has no timeout layer; a request that exceeds `timeout`
/// fails the run instead of hanging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
	pub timeout: Duration,
	pub connect_timeout: Duration,
}

impl Default for HttpSettings {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
			connect_timeout: Duration::from_secs(5),
		}
	}
}

impl HttpSettings {
	pub(crate) fn build_client(&self) -> Result<Client, reqwest::Error> {
		Client::builder()
			.user_agent(user_agent())
			.timeout(self.timeout)
			.connect_timeout(self.connect_timeout)
			.build()
	}
}

/// Returns the User-Agent string, `dirseed/{version}`.
pub fn user_agent() -> String {
	format!("dirseed/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts, vec!["dirseed", env!("CARGO_PKG_VERSION")]);
	}

	#[test]
	fn default_settings_build_a_client() {
		let settings = HttpSettings::default();
		assert_eq!(settings.timeout, Duration::from_secs(30));
		assert!(settings.build_client().is_ok());
	}
}
