// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::Path;

use async_trait::async_trait;

use crate::error::PasswordError;

/// Sets a directory user's password from a one-shot password file.
///
/// Implementations authenticate as the directory administrator, never as the
/// target user, and issue exactly one protocol operation per call.
#[async_trait]
pub trait PasswordSetter: Send + Sync {
	async fn set_password(&self, user_id: &str, password_file: &Path) -> Result<(), PasswordError>;
}
