// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::types::{DirectoryGroup, DirectoryUser, GroupId, NewUser};

/// Operations the reconciliation engine needs from the directory.
///
/// Every call is a single request. Implementations do not retry.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
	/// List every group.
	async fn query_groups(&self) -> Result<Vec<DirectoryGroup>, DirectoryError>;

	/// List every user together with its group memberships.
	async fn query_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError>;

	/// Create a group named `name`.
	async fn create_group(&self, name: &str) -> Result<DirectoryGroup, DirectoryError>;

	/// Create a user record without memberships or password.
	async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, DirectoryError>;

	/// Add one membership edge.
	async fn add_user_to_group(&self, user_id: &str, group_id: GroupId)
		-> Result<(), DirectoryError>;
}
