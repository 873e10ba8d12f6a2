// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
	/// Size of the converged group map.
	pub groups: usize,
	/// Size of the converged user map.
	pub users: usize,
	/// Groups created during this run, in creation order.
	pub groups_created: Vec<String>,
	/// Users created during this run, in creation order.
	pub users_created: Vec<String>,
}

impl RunReport {
	/// True when the run issued at least one creation.
	pub fn mutations_applied(&self) -> bool {
		!self.groups_created.is_empty() || !self.users_created.is_empty()
	}
}

impl fmt::Display for RunReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} groups, {} users ({} groups created, {} users created)",
			self.groups,
			self.users,
			self.groups_created.len(),
			self.users_created.len()
		)
	}
}
