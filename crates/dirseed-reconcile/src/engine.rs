// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirseed_config::Seed;
use dirseed_directory::DirectoryClient;
use dirseed_ldap::PasswordSetter;
use tracing::{info, instrument};

use crate::context::RunContext;
use crate::error::ReconcileError;
use crate::report::RunReport;
use crate::snapshot::ActualState;

/// Drives one additive pass of a seed against a directory.
pub struct Reconciler<D, P> {
	directory: D,
	passwords: P,
}

impl<D, P> Reconciler<D, P>
where
	D: DirectoryClient,
	P: PasswordSetter,
{
	pub fn new(directory: D, passwords: P) -> Self {
		Self {
			directory,
			passwords,
		}
	}

	/// Snapshot the directory, then converge groups, then users.
	///
	/// Stops at the first error. Changes made before it stay in place.
	#[instrument(skip_all, fields(groups = seed.groups.len(), users = seed.users.len()))]
	pub async fn run(&self, seed: &Seed) -> Result<RunReport, ReconcileError> {
		let state = ActualState::fetch(&self.directory).await?;
		info!(
			groups = state.groups.len(),
			users = state.users.len(),
			"loaded current directory state"
		);

		let mut ctx = RunContext::new(state);
		ctx.converge_groups(&self.directory, &seed.desired_groups())
			.await?;
		ctx.converge_users(&self.directory, &self.passwords, seed)
			.await?;

		let report = ctx.finish();
		info!(
			groups = report.groups,
			users = report.users,
			"reconciliation complete"
		);
		Ok(report)
	}
}
