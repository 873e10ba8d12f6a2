// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;

use dirseed_directory::DirectoryClient;
use tracing::info;

use crate::error::ReconcileError;
use crate::snapshot::GroupMap;

/// Create every desired group missing from `groups`, in name order.
///
/// Created groups are inserted into `groups`; on return every desired name
/// is a key. Existing groups are left alone. The first creation failure is
/// returned immediately, leaving later names unprocessed.
///
/// Returns the names of the groups created.
pub async fn reconcile_groups<D>(
	client: &D,
	desired: &BTreeSet<&str>,
	groups: &mut GroupMap,
) -> Result<Vec<String>, ReconcileError>
where
	D: DirectoryClient + ?Sized,
{
	let mut created = Vec::new();

	for &name in desired {
		if groups.contains_key(name) {
			info!(group = %name, "group exists, skipping");
			continue;
		}

		info!(group = %name, "group does not exist, creating");
		let group = client
			.create_group(name)
			.await
			.map_err(|source| ReconcileError::CreateGroup {
				group: name.to_string(),
				source,
			})?;
		info!(group = %name, id = %group.id, "created group");

		groups.insert(name.to_string(), group);
		created.push(name.to_string());
	}

	Ok(created)
}
