// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirseed_config::{Seed, UserSpec};
use dirseed_directory::{DirectoryClient, DirectoryGroup, DirectoryUser, NewUser};
use dirseed_ldap::PasswordSetter;
use tracing::{debug, info, instrument};

use crate::error::ReconcileError;
use crate::snapshot::{GroupMap, UserMap};

/// A desired user whose group names have been looked up in the converged
/// group map. The seed entry itself is borrowed and left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser<'a> {
	pub spec: &'a UserSpec,
	/// Groups in the order the seed lists them, duplicates removed.
	pub groups: Vec<DirectoryGroup>,
}

impl ResolvedUser<'_> {
	/// Attributes for the create-user call.
	pub fn new_user(&self) -> NewUser {
		NewUser {
			id: self.spec.id.clone(),
			email: self.spec.email.clone(),
			display_name: self.spec.display_name.clone(),
			first_name: self.spec.first_name.clone(),
			last_name: self.spec.last_name.clone(),
		}
	}
}

/// Look up each of `spec`'s group names in `groups`.
pub fn resolve_user<'a>(
	spec: &'a UserSpec,
	groups: &GroupMap,
) -> Result<ResolvedUser<'a>, ReconcileError> {
	let mut resolved: Vec<DirectoryGroup> = Vec::with_capacity(spec.groups.len());

	for name in &spec.groups {
		let group = groups
			.get(name)
			.ok_or_else(|| ReconcileError::UnresolvedGroup {
				user: spec.id.clone(),
				group: name.clone(),
			})?;
		if !resolved.iter().any(|g| g.id == group.id) {
			resolved.push(group.clone());
		}
	}

	Ok(ResolvedUser {
		spec,
		groups: resolved,
	})
}

/// Provision one user: create the record, add each membership, then set the
/// password.
///
/// The steps are independent calls. A failure part way leaves the user
/// partially provisioned, and later runs skip it because it exists.
#[instrument(skip_all, fields(user = %user.spec.id))]
pub async fn create_user<D, P>(
	client: &D,
	passwords: &P,
	user: &ResolvedUser<'_>,
) -> Result<DirectoryUser, ReconcileError>
where
	D: DirectoryClient + ?Sized,
	P: PasswordSetter + ?Sized,
{
	let id = &user.spec.id;

	let mut created = client
		.create_user(&user.new_user())
		.await
		.map_err(|source| ReconcileError::CreateUser {
			user: id.clone(),
			source,
		})?;
	debug!("created user record");

	for group in &user.groups {
		client
			.add_user_to_group(id, group.id)
			.await
			.map_err(|source| ReconcileError::AddMembership {
				user: id.clone(),
				group: group.display_name.clone(),
				source,
			})?;
		debug!(group = %group.display_name, "added membership");
	}
	created.groups = user.groups.clone();

	passwords
		.set_password(id, &user.spec.password_file)
		.await
		.map_err(|source| ReconcileError::SetPassword {
			user: id.clone(),
			source,
		})?;
	debug!("set initial password");

	Ok(created)
}

/// Create every user of `seed` missing from `users`.
///
/// Users are processed in ascending id order ([`Seed::users_sorted`]). Group
/// names are resolved for every user, existing or not, so a dangling
/// reference aborts the run even when the user would be skipped. A user whose
/// id is already present gets no calls at all: attributes, memberships and
/// password stay as they are.
///
/// Returns the ids of the users created.
pub async fn reconcile_users<D, P>(
	client: &D,
	passwords: &P,
	seed: &Seed,
	groups: &GroupMap,
	users: &mut UserMap,
) -> Result<Vec<String>, ReconcileError>
where
	D: DirectoryClient + ?Sized,
	P: PasswordSetter + ?Sized,
{
	let mut created = Vec::new();
	for spec in seed.users_sorted() {
		let resolved = resolve_user(spec, groups)?;

		if users.contains_key(&spec.id) {
			info!(user = %spec.id, "user exists, skipping");
			continue;
		}

		info!(user = %spec.id, "user does not exist, creating");
		let user = create_user(client, passwords, &resolved).await?;
		info!(user = %spec.id, groups = user.groups.len(), "created user");

		users.insert(spec.id.clone(), user);
		created.push(spec.id.clone());
	}

	Ok(created)
}
