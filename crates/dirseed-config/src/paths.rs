// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default file locations and file preconditions.

use std::fs::File;
use std::path::Path;

use crate::ConfigError;

/// Environment variable overriding the seed document location.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Environment variable overriding the administrator credential file location.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

pub const DEFAULT_CONFIG_FILE: &str = "/config/config_file.json";

pub const DEFAULT_ADMIN_PASSWORD_FILE: &str = "/config/admin_password";

/// Check that `path` is an existing regular file that can be opened for
/// reading. Nothing is read from it.
///
/// `kind` names the file in the error message ("Configuration",
/// "Admin password file", ...).
pub fn ensure_readable_file(kind: &'static str, path: &Path) -> Result<(), ConfigError> {
	let not_found = || ConfigError::NotFound {
		kind,
		path: path.to_path_buf(),
	};

	let metadata = match std::fs::metadata(path) {
		Ok(metadata) => metadata,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
		Err(source) => {
			return Err(ConfigError::Io {
				path: path.to_path_buf(),
				source,
			})
		}
	};

	if !metadata.is_file() {
		return Err(not_found());
	}

	File::open(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(kind, path = %path.display(), "file is readable");
	Ok(())
}
