// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirseed_directory::DirectoryError;
use dirseed_ldap::PasswordError;

/// Broad classes of run-ending failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Reading the directory's current state failed.
	Query,
	/// A creation, membership or password operation failed.
	Mutation,
	/// A user references a group that does not exist.
	Resolution,
}

/// Errors that abort a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
	#[error("failed to query {what}: {source}")]
	Query {
		what: &'static str,
		#[source]
		source: DirectoryError,
	},

	#[error("failed to create group '{group}': {source}")]
	CreateGroup {
		group: String,
		#[source]
		source: DirectoryError,
	},

	#[error("failed to create user '{user}': {source}")]
	CreateUser {
		user: String,
		#[source]
		source: DirectoryError,
	},

	#[error("failed to add user '{user}' to group '{group}': {source}")]
	AddMembership {
		user: String,
		group: String,
		#[source]
		source: DirectoryError,
	},

	#[error("failed to set password for user '{user}': {source}")]
	SetPassword {
		user: String,
		#[source]
		source: PasswordError,
	},

	#[error("user '{user}' references group '{group}', which does not exist")]
	UnresolvedGroup { user: String, group: String },
}

impl ReconcileError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			ReconcileError::Query { .. } => ErrorKind::Query,
			ReconcileError::CreateGroup { .. }
			| ReconcileError::CreateUser { .. }
			| ReconcileError::AddMembership { .. }
			| ReconcileError::SetPassword { .. } => ErrorKind::Mutation,
			ReconcileError::UnresolvedGroup { .. } => ErrorKind::Resolution,
		}
	}

	/// The group or user the failing operation was about, if any.
	pub fn entity(&self) -> Option<&str> {
		match self {
			ReconcileError::Query { .. } => None,
			ReconcileError::CreateGroup { group, .. } => Some(group),
			ReconcileError::CreateUser { user, .. }
			| ReconcileError::AddMembership { user, .. }
			| ReconcileError::SetPassword { user, .. }
			| ReconcileError::UnresolvedGroup { user, .. } => Some(user),
		}
	}
}
