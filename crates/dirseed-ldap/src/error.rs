// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
	#[error("password file {} is not readable: {source}", .path.display())]
	Unreadable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{} is not installed or not in PATH", .program.display())]
	NotInstalled { program: PathBuf },

	#[error("{} failed for {target} (exit status {}): {stderr}{stdout}", .program.display(), status_label(.status))]
	CommandFailed {
		program: PathBuf,
		target: String,
		status: Option<i32>,
		stdout: String,
		stderr: String,
	},

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

fn status_label(status: &Option<i32>) -> String {
	match status {
		Some(code) => code.to_string(),
		None => "signal".to_string(),
	}
}
