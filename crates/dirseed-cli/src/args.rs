// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dirseed_config::{
	ADMIN_PASSWORD_ENV, CONFIG_FILE_ENV, DEFAULT_ADMIN_PASSWORD_FILE, DEFAULT_CONFIG_FILE,
};
use dirseed_directory::HttpSettings;
use dirseed_ldap::DEFAULT_PROGRAM;

/// Create missing groups and users in an LLDAP directory.
///
/// Existing groups and users are never modified.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirseed", version, about)]
pub struct Args {
	/// Seed document (JSON).
	#[arg(long, env = CONFIG_FILE_ENV, default_value = DEFAULT_CONFIG_FILE)]
	pub config: PathBuf,

	/// File holding the administrator password.
	#[arg(long, env = ADMIN_PASSWORD_ENV, default_value = DEFAULT_ADMIN_PASSWORD_FILE)]
	pub admin_password_file: PathBuf,

	/// Password tool used to set initial user passwords.
	#[arg(long, env = "LDAPPASSWD_PATH", default_value = DEFAULT_PROGRAM)]
	pub ldappasswd: PathBuf,

	/// Per-request timeout for the query API.
	#[arg(long, default_value_t = 30)]
	pub http_timeout_secs: u64,

	/// Log filter used when RUST_LOG is unset.
	#[arg(long, default_value = "info")]
	pub log_level: String,

	/// Emit logs as JSON lines.
	#[arg(long)]
	pub json_logs: bool,
}

impl Args {
	pub fn http_settings(&self) -> HttpSettings {
		HttpSettings {
			timeout: Duration::from_secs(self.http_timeout_secs),
			..HttpSettings::default()
		}
	}
}
