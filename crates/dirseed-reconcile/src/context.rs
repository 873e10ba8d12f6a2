// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;

use dirseed_config::Seed;
use dirseed_directory::DirectoryClient;
use dirseed_ldap::PasswordSetter;

use crate::error::ReconcileError;
use crate::groups::reconcile_groups;
use crate::report::RunReport;
use crate::snapshot::ActualState;
use crate::users::reconcile_users;

/// State shared by the phases of one run.
///
/// Owns the group and user maps from the initial snapshot. Each phase adds
/// what it creates, so later phases see a converged view. Dropped at the end
/// of the run.
#[derive(Debug, Default)]
pub struct RunContext {
	state: ActualState,
	groups_created: Vec<String>,
	users_created: Vec<String>,
}

impl RunContext {
	pub fn new(state: ActualState) -> Self {
		Self {
			state,
			..Self::default()
		}
	}

	pub fn state(&self) -> &ActualState {
		&self.state
	}

	pub async fn converge_groups<D>(
		&mut self,
		client: &D,
		desired: &BTreeSet<&str>,
	) -> Result<(), ReconcileError>
	where
		D: DirectoryClient + ?Sized,
	{
		let created = reconcile_groups(client, desired, &mut self.state.groups).await?;
		self.groups_created.extend(created);
		Ok(())
	}

	/// Must run after [`RunContext::converge_groups`]; group references are
	/// resolved against the map it leaves behind.
	pub async fn converge_users<D, P>(
		&mut self,
		client: &D,
		passwords: &P,
		seed: &Seed,
	) -> Result<(), ReconcileError>
	where
		D: DirectoryClient + ?Sized,
		P: PasswordSetter + ?Sized,
	{
		let created = reconcile_users(
			client,
			passwords,
			seed,
			&self.state.groups,
			&mut self.state.users,
		)
		.await?;
		self.users_created.extend(created);
		Ok(())
	}

	pub fn finish(self) -> RunReport {
		RunReport {
			groups: self.state.groups.len(),
			users: self.state.users.len(),
			groups_created: self.groups_created,
			users_created: self.users_created,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dirseed_directory::MockDirectoryClient;

	#[tokio::test]
	async fn finish_counts_converged_maps() {
		let mock = MockDirectoryClient::new()
			.with_group("eng")
			.with_user("bob", &["eng"]);
		let mut ctx = RunContext::new(ActualState::fetch(&mock).await.unwrap());

		ctx.converge_groups(&mock, &BTreeSet::from(["eng", "ops"]))
			.await
			.unwrap();
		assert!(ctx.state().groups.contains_key("ops"));

		let report = ctx.finish();
		assert_eq!(report.groups, 2);
		assert_eq!(report.users, 1);
		assert_eq!(report.groups_created, vec!["ops"]);
		assert!(report.users_created.is_empty());
	}
}
