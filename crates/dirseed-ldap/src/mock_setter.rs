// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::PasswordError;
use crate::setter::PasswordSetter;

/// Recorded call to the mock password setter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordCall {
	pub user_id: String,
	pub password_file: PathBuf,
}

#[derive(Default)]
struct MockState {
	calls: Vec<PasswordCall>,
	failing_users: HashSet<String>,
}

/// Mock password setter for testing. Clones share recorded calls.
#[derive(Clone, Default)]
pub struct MockPasswordSetter {
	state: Arc<Mutex<MockState>>,
}

impl MockPasswordSetter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make `set_password` fail for `user_id`.
	pub fn with_failing_user(self, user_id: &str) -> Self {
		self.state().failing_users.insert(user_id.to_string());
		self
	}

	/// Returns the recorded calls.
	pub fn calls(&self) -> Vec<PasswordCall> {
		self.state().calls.clone()
	}

	fn state(&self) -> MutexGuard<'_, MockState> {
		self
			.state
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

#[async_trait]
impl PasswordSetter for MockPasswordSetter {
	async fn set_password(&self, user_id: &str, password_file: &Path) -> Result<(), PasswordError> {
		let mut state = self.state();
		state.calls.push(PasswordCall {
			user_id: user_id.to_string(),
			password_file: password_file.to_path_buf(),
		});

		if state.failing_users.contains(user_id) {
			return Err(PasswordError::CommandFailed {
				program: PathBuf::from("mock-ldappasswd"),
				target: user_id.to_string(),
				status: Some(1),
				stdout: String::new(),
				stderr: "injected failure".to_string(),
			});
		}
		Ok(())
	}
}
