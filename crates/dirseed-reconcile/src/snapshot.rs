// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;

use dirseed_directory::{DirectoryClient, DirectoryGroup, DirectoryUser};
use tracing::debug;

use crate::error::ReconcileError;

/// Groups keyed by display name.
pub type GroupMap = BTreeMap<String, DirectoryGroup>;

/// Users keyed by id.
pub type UserMap = BTreeMap<String, DirectoryUser>;

/// The directory's groups and users as observed once at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualState {
	pub groups: GroupMap,
	pub users: UserMap,
}

impl ActualState {
	/// Query groups, then users.
	pub async fn fetch<D>(client: &D) -> Result<Self, ReconcileError>
	where
		D: DirectoryClient + ?Sized,
	{
		let groups = client
			.query_groups()
			.await
			.map_err(|source| ReconcileError::Query {
				what: "groups",
				source,
			})?;
		let users = client
			.query_users()
			.await
			.map_err(|source| ReconcileError::Query {
				what: "users",
				source,
			})?;

		let state = Self::from_parts(groups, users);
		debug!(
			groups = state.groups.len(),
			users = state.users.len(),
			"fetched directory snapshot"
		);
		Ok(state)
	}

	pub fn from_parts(groups: Vec<DirectoryGroup>, users: Vec<DirectoryUser>) -> Self {
		Self {
			groups: groups
				.into_iter()
				.map(|g| (g.display_name.clone(), g))
				.collect(),
			users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
		}
	}
}
