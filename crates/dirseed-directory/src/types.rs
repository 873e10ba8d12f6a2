// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity the directory assigns to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
	pub id: GroupId,
	pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
	pub id: String,
	pub email: String,
	pub display_name: String,
	#[serde(default)]
	pub groups: Vec<DirectoryGroup>,
}

/// Attributes sent when creating a user. Memberships and the password are
/// applied by separate operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	pub id: String,
	pub email: String,
	pub display_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn user_deserializes_from_api_shape() {
		let user: DirectoryUser = serde_json::from_value(json!({
			"id": "alice",
			"email": "alice@example.com",
			"displayName": "Alice",
			"groups": [{"id": 3, "displayName": "eng"}]
		}))
		.unwrap();

		assert_eq!(user.groups[0].id, GroupId(3));
		assert_eq!(user.groups[0].display_name, "eng");
	}

	#[test]
	fn new_user_omits_absent_names() {
		let user = NewUser {
			id: "alice".into(),
			email: "alice@example.com".into(),
			display_name: "Alice".into(),
			first_name: None,
			last_name: Some("Liddell".into()),
		};
		assert_eq!(
			serde_json::to_value(&user).unwrap(),
			json!({
				"id": "alice",
				"email": "alice@example.com",
				"displayName": "Alice",
				"lastName": "Liddell"
			})
		);
	}
}
