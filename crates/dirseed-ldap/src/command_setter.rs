// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::dn::people_dn;
use crate::error::PasswordError;
use crate::setter::PasswordSetter;

pub const DEFAULT_PROGRAM: &str = "ldappasswd";

/// Password setter that runs `ldappasswd` bound as the administrator.
///
/// Both the administrator password and the new user password are handed to
/// the tool as file paths (`-y`, `-T`); neither value passes through this
/// process's memory or argv.
#[derive(Debug, Clone)]
pub struct LdapPasswdCommand {
	program: PathBuf,
	ldap_url: String,
	admin_bind_dn: String,
	admin_password_file: PathBuf,
	base_dn: String,
}

impl LdapPasswdCommand {
	pub fn new(
		ldap_url: impl Into<String>,
		admin_username: &str,
		admin_password_file: impl Into<PathBuf>,
		base_dn: impl Into<String>,
	) -> Self {
		let base_dn = base_dn.into();
		Self {
			program: PathBuf::from(DEFAULT_PROGRAM),
			ldap_url: ldap_url.into(),
			admin_bind_dn: people_dn(admin_username, &base_dn),
			admin_password_file: admin_password_file.into(),
			base_dn,
		}
	}

	/// Use a different executable, e.g. an absolute path to `ldappasswd`.
	pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
		self.program = program.into();
		self
	}

	pub fn admin_bind_dn(&self) -> &str {
		&self.admin_bind_dn
	}

	/// Arguments for setting `user_id`'s password from `password_file`.
	pub fn args(&self, user_id: &str, password_file: &Path) -> Vec<OsString> {
		vec![
			"-x".into(),
			"-H".into(),
			self.ldap_url.clone().into(),
			"-D".into(),
			self.admin_bind_dn.clone().into(),
			"-y".into(),
			self.admin_password_file.clone().into(),
			"-T".into(),
			password_file.into(),
			people_dn(user_id, &self.base_dn).into(),
		]
	}
}

#[async_trait]
impl PasswordSetter for LdapPasswdCommand {
	async fn set_password(&self, user_id: &str, password_file: &Path) -> Result<(), PasswordError> {
		File::open(password_file).map_err(|source| PasswordError::Unreadable {
			path: password_file.to_path_buf(),
			source,
		})?;

		let target = people_dn(user_id, &self.base_dn);
		trace!(
			program = %self.program.display(),
			target = %target,
			bind_dn = %self.admin_bind_dn,
			"running password tool"
		);

		let output = Command::new(&self.program)
			.args(self.args(user_id, password_file))
			.stdin(Stdio::null())
			.output()
			.await
			.map_err(|e| {
				if e.kind() == std::io::ErrorKind::NotFound {
					warn!(program = %self.program.display(), "password tool not found");
					PasswordError::NotInstalled {
						program: self.program.clone(),
					}
				} else {
					PasswordError::Io(e)
				}
			})?;

		if output.status.success() {
			debug!(target = %target, "password set");
			Ok(())
		} else {
			Err(PasswordError::CommandFailed {
				program: self.program.clone(),
				target,
				status: output.status.code(),
				stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
				stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
			})
		}
	}
}
