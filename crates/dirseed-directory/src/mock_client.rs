// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::client::DirectoryClient;
use crate::error::DirectoryError;
use crate::types::{DirectoryGroup, DirectoryUser, GroupId, NewUser};

/// Recorded call to the mock directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryCall {
	QueryGroups,
	QueryUsers,
	CreateGroup(String),
	CreateUser(String),
	AddUserToGroup { user_id: String, group_id: GroupId },
}

impl DirectoryCall {
	/// True for calls that change directory state.
	pub fn is_mutation(&self) -> bool {
		!matches!(self, DirectoryCall::QueryGroups | DirectoryCall::QueryUsers)
	}
}

#[derive(Default)]
struct MockState {
	groups: Vec<DirectoryGroup>,
	users: Vec<DirectoryUser>,
	next_group_id: i64,
	calls: Vec<DirectoryCall>,
	fail_queries: bool,
	fail_groups: HashSet<String>,
	fail_users: HashSet<String>,
	fail_memberships: HashSet<(String, String)>,
}

impl MockState {
	fn insert_group(&mut self, name: &str) -> DirectoryGroup {
		self.next_group_id += 1;
		let group = DirectoryGroup {
			id: GroupId(self.next_group_id),
			display_name: name.to_string(),
		};
		self.groups.push(group.clone());
		group
	}

	fn group_named(&self, name: &str) -> Option<&DirectoryGroup> {
		self.groups.iter().find(|g| g.display_name == name)
	}
}

/// In-memory directory for tests.
///
/// Created groups and users are visible to later queries, so a second run
/// against the same mock observes the first run's effects. Clones share
/// state.
#[derive(Clone, Default)]
pub struct MockDirectoryClient {
	state: Arc<Mutex<MockState>>,
}

impl MockDirectoryClient {
	pub fn new() -> Self {
		Self::default()
	}

	/// Pre-populate a group.
	pub fn with_group(self, name: &str) -> Self {
		self.state().insert_group(name);
		self
	}

	/// Pre-populate a user that belongs to `groups`; groups not yet present
	/// are added first.
	pub fn with_user(self, id: &str, groups: &[&str]) -> Self {
		{
			let mut state = self.state();
			let mut memberships = Vec::with_capacity(groups.len());
			for name in groups {
				let group = match state.group_named(name) {
					Some(group) => group.clone(),
					None => state.insert_group(name),
				};
				memberships.push(group);
			}
			state.users.push(DirectoryUser {
				id: id.to_string(),
				email: format!("{id}@example.com"),
				display_name: id.to_string(),
				groups: memberships,
			});
		}
		self
	}

	/// Make both queries fail.
	pub fn with_failing_queries(self) -> Self {
		self.state().fail_queries = true;
		self
	}

	/// Make creation of the group named `name` fail.
	pub fn with_failing_group(self, name: &str) -> Self {
		self.state().fail_groups.insert(name.to_string());
		self
	}

	/// Make creation of the user `id` fail.
	pub fn with_failing_user(self, id: &str) -> Self {
		self.state().fail_users.insert(id.to_string());
		self
	}

	/// Make adding `user_id` to the group named `group` fail.
	pub fn with_failing_membership(self, user_id: &str, group: &str) -> Self {
		self
			.state()
			.fail_memberships
			.insert((user_id.to_string(), group.to_string()));
		self
	}

	/// Returns the recorded calls.
	pub fn calls(&self) -> Vec<DirectoryCall> {
		self.state().calls.clone()
	}

	/// Returns only the recorded mutations.
	pub fn mutations(&self) -> Vec<DirectoryCall> {
		self
			.state()
			.calls
			.iter()
			.filter(|c| c.is_mutation())
			.cloned()
			.collect()
	}

	/// Clears recorded calls.
	pub fn clear_calls(&self) {
		self.state().calls.clear();
	}

	/// Current groups.
	pub fn groups(&self) -> Vec<DirectoryGroup> {
		self.state().groups.clone()
	}

	/// Current user `id`, if present.
	pub fn user(&self, id: &str) -> Option<DirectoryUser> {
		self.state().users.iter().find(|u| u.id == id).cloned()
	}

	fn state(&self) -> MutexGuard<'_, MockState> {
		self
			.state
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

fn injected(operation: &'static str) -> DirectoryError {
	DirectoryError::Graphql {
		operation,
		messages: vec!["injected failure".to_string()],
		raw: String::new(),
	}
}

#[async_trait]
impl DirectoryClient for MockDirectoryClient {
	async fn query_groups(&self) -> Result<Vec<DirectoryGroup>, DirectoryError> {
		let mut state = self.state();
		state.calls.push(DirectoryCall::QueryGroups);
		if state.fail_queries {
			return Err(injected("groups"));
		}
		Ok(state.groups.clone())
	}

	async fn query_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError> {
		let mut state = self.state();
		state.calls.push(DirectoryCall::QueryUsers);
		if state.fail_queries {
			return Err(injected("users"));
		}
		Ok(state.users.clone())
	}

	async fn create_group(&self, name: &str) -> Result<DirectoryGroup, DirectoryError> {
		let mut state = self.state();
		state.calls.push(DirectoryCall::CreateGroup(name.to_string()));
		if state.fail_groups.contains(name) || state.group_named(name).is_some() {
			return Err(injected("createGroup"));
		}
		Ok(state.insert_group(name))
	}

	async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, DirectoryError> {
		let mut state = self.state();
		state.calls.push(DirectoryCall::CreateUser(user.id.clone()));
		if state.fail_users.contains(&user.id) || state.users.iter().any(|u| u.id == user.id) {
			return Err(injected("createUser"));
		}
		let created = DirectoryUser {
			id: user.id.clone(),
			email: user.email.clone(),
			display_name: user.display_name.clone(),
			groups: Vec::new(),
		};
		state.users.push(created.clone());
		Ok(created)
	}

	async fn add_user_to_group(
		&self,
		user_id: &str,
		group_id: GroupId,
	) -> Result<(), DirectoryError> {
		let mut state = self.state();
		state.calls.push(DirectoryCall::AddUserToGroup {
			user_id: user_id.to_string(),
			group_id,
		});

		let group = state
			.groups
			.iter()
			.find(|g| g.id == group_id)
			.cloned()
			.ok_or_else(|| injected("addUserToGroup"))?;
		if state
			.fail_memberships
			.contains(&(user_id.to_string(), group.display_name.clone()))
		{
			return Err(injected("addUserToGroup"));
		}

		let user = state
			.users
			.iter_mut()
			.find(|u| u.id == user_id)
			.ok_or_else(|| injected("addUserToGroup"))?;
		if !user.groups.contains(&group) {
			user.groups.push(group);
		}
		Ok(())
	}
}
