// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GraphQL-over-HTTP implementation of [`DirectoryClient`].

use async_trait::async_trait;
use dirseed_common_secret::SecretString;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::client::DirectoryClient;
use crate::error::DirectoryError;
use crate::http::HttpSettings;
use crate::types::{DirectoryGroup, DirectoryUser, GroupId, NewUser};

const GROUPS_QUERY: &str = "query ListGroups { groups { id displayName } }";

const USERS_QUERY: &str =
	"query ListUsers { users { id email displayName groups { id displayName } } }";

const CREATE_GROUP_MUTATION: &str =
	"mutation CreateGroup($name: String!) { createGroup(name: $name) { id displayName } }";

const CREATE_USER_MUTATION: &str = "mutation CreateUser($user: CreateUserInput!) { \
	createUser(user: $user) { id email displayName groups { id displayName } } }";

const ADD_USER_TO_GROUP_MUTATION: &str = "mutation AddUserToGroup($userId: String!, $groupId: Int!) { \
	addUserToGroup(userId: $userId, groupId: $groupId) { ok } }";

#[derive(Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
	token: SecretString,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
	query: &'a str,
	variables: Value,
}

#[derive(Deserialize)]
struct GraphqlResponse {
	data: Option<Value>,
	errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
	message: String,
}

#[derive(Deserialize)]
struct GroupsData {
	groups: Vec<DirectoryGroup>,
}

#[derive(Deserialize)]
struct UsersData {
	users: Vec<DirectoryUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateGroupData {
	create_group: DirectoryGroup,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserData {
	create_user: DirectoryUser,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddUserToGroupData {
	add_user_to_group: Success,
}

#[derive(Deserialize)]
struct Success {
	ok: bool,
}

/// Authenticated client for the directory's `/api/graphql` endpoint.
pub struct GraphqlDirectoryClient {
	http: Client,
	graphql_url: Url,
	token: SecretString,
}

impl GraphqlDirectoryClient {
	/// Exchange administrator credentials for a session token at
	/// `{web_url}/auth/simple/login` and return a client carrying it.
	#[instrument(skip_all, fields(web_url = %web_url, username = %username))]
	pub async fn login(
		web_url: &str,
		username: &str,
		password: &SecretString,
		settings: &HttpSettings,
	) -> Result<Self, DirectoryError> {
		let base = base_url(web_url)?;
		let http = settings.build_client()?;
		let login_url = base.join("auth/simple/login")?;

		debug!(url = %login_url, "logging in");
		let response = http
			.post(login_url)
			.json(&LoginRequest {
				username,
				password: password.expose(),
			})
			.send()
			.await
			.map_err(|e| DirectoryError::Login {
				username: username.to_string(),
				message: e.to_string(),
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(DirectoryError::Login {
				username: username.to_string(),
				message: format!("HTTP {status}: {body}"),
			});
		}

		let login: LoginResponse = response.json().await.map_err(|e| DirectoryError::Login {
			username: username.to_string(),
			message: format!("unexpected login response: {e}"),
		})?;

		debug!("login succeeded");
		Self::from_parts(http, &base, login.token)
	}

	/// Build a client around an already issued session token.
	pub fn with_token(
		web_url: &str,
		token: SecretString,
		settings: &HttpSettings,
	) -> Result<Self, DirectoryError> {
		let base = base_url(web_url)?;
		Self::from_parts(settings.build_client()?, &base, token)
	}

	fn from_parts(http: Client, base: &Url, token: SecretString) -> Result<Self, DirectoryError> {
		Ok(Self {
			http,
			graphql_url: base.join("api/graphql")?,
			token,
		})
	}

	async fn execute<T: DeserializeOwned>(
		&self,
		operation: &'static str,
		query: &str,
		variables: Value,
	) -> Result<T, DirectoryError> {
		trace!(operation, "sending GraphQL request");
		let response = self
			.http
			.post(self.graphql_url.clone())
			.bearer_auth(self.token.expose())
			.json(&GraphqlRequest { query, variables })
			.send()
			.await?;

		let status = response.status();
		let raw = response.text().await?;
		if !status.is_success() {
			return Err(DirectoryError::Status {
				operation,
				status: status.as_u16(),
				body: raw,
			});
		}

		let envelope: GraphqlResponse = serde_json::from_str(&raw)
			.map_err(|source| DirectoryError::Parse { operation, source })?;

		if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
			return Err(DirectoryError::Graphql {
				operation,
				messages: errors.into_iter().map(|e| e.message).collect(),
				raw,
			});
		}

		let data = match envelope.data {
			Some(data) if !data.is_null() => data,
			_ => return Err(DirectoryError::MissingData { operation, raw }),
		};

		serde_json::from_value(data).map_err(|source| DirectoryError::Parse { operation, source })
	}
}

#[async_trait]
impl DirectoryClient for GraphqlDirectoryClient {
	async fn query_groups(&self) -> Result<Vec<DirectoryGroup>, DirectoryError> {
		let data: GroupsData = self.execute("groups", GROUPS_QUERY, json!({})).await?;
		debug!(count = data.groups.len(), "fetched groups");
		Ok(data.groups)
	}

	async fn query_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError> {
		let data: UsersData = self.execute("users", USERS_QUERY, json!({})).await?;
		debug!(count = data.users.len(), "fetched users");
		Ok(data.users)
	}

	async fn create_group(&self, name: &str) -> Result<DirectoryGroup, DirectoryError> {
		let data: CreateGroupData = self
			.execute(
				"createGroup",
				CREATE_GROUP_MUTATION,
				json!({ "name": name }),
			)
			.await?;
		Ok(data.create_group)
	}

	async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, DirectoryError> {
		let data: CreateUserData = self
			.execute("createUser", CREATE_USER_MUTATION, json!({ "user": user }))
			.await?;
		Ok(data.create_user)
	}

	async fn add_user_to_group(
		&self,
		user_id: &str,
		group_id: GroupId,
	) -> Result<(), DirectoryError> {
		let data: AddUserToGroupData = self
			.execute(
				"addUserToGroup",
				ADD_USER_TO_GROUP_MUTATION,
				json!({ "userId": user_id, "groupId": group_id }),
			)
			.await?;
		if !data.add_user_to_group.ok {
			return Err(DirectoryError::Rejected {
				operation: "addUserToGroup",
			});
		}
		Ok(())
	}
}

/// Parse `web_url` as a base for relative joins; a trailing slash is added so
/// that a path prefix such as `/lldap` is kept.
fn base_url(web_url: &str) -> Result<Url, DirectoryError> {
	Ok(Url::parse(&format!("{}/", web_url.trim_end_matches('/')))?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::http::user_agent;
	use dirseed_common_secret::Secret;
	use wiremock::matchers::{body_json, body_partial_json, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	async fn logged_in(server: &MockServer) -> GraphqlDirectoryClient {
		Mock::given(method("POST"))
			.and(path("/auth/simple/login"))
			.and(body_json(json!({"username": "admin", "password": "pw\n"})))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(json!({"token": "jwt-1", "refreshToken": "refresh-1"})),
			)
			.expect(1)
			.mount(server)
			.await;

		let password = Secret::new("pw\n".to_string());
		GraphqlDirectoryClient::login(&server.uri(), "admin", &password, &HttpSettings::default())
			.await
			.unwrap()
	}

	fn graphql_ok(data: Value) -> ResponseTemplate {
		ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
	}

	#[test]
	fn base_url_keeps_path_prefix() {
		let url = base_url("http://lldap:17170/prefix/").unwrap();
		assert_eq!(
			url.join("api/graphql").unwrap().as_str(),
			"http://lldap:17170/prefix/api/graphql"
		);
	}

	#[test]
	fn invalid_web_url_rejected() {
		assert!(matches!(
			base_url("not a url"),
			Err(DirectoryError::InvalidUrl(_))
		));
	}

	#[tokio::test]
	async fn login_token_is_sent_as_bearer() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(header("Authorization", "Bearer jwt-1"))
			.and(body_partial_json(json!({"query": GROUPS_QUERY})))
			.respond_with(graphql_ok(json!({
				"groups": [{"id": 1, "displayName": "eng"}, {"id": 2, "displayName": "ops"}]
			})))
			.expect(1)
			.mount(&server)
			.await;

		let groups = client.query_groups().await.unwrap();
		assert_eq!(groups.len(), 2);
		assert_eq!(groups[1].id, GroupId(2));
		assert_eq!(groups[1].display_name, "ops");
	}

	#[tokio::test]
	async fn login_client_reuses_prefix_and_user_agent() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/lldap/auth/simple/login"))
			.and(header("User-Agent", user_agent().as_str()))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-2"})))
			.expect(1)
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/lldap/api/graphql"))
			.and(header("User-Agent", user_agent().as_str()))
			.and(header("Authorization", "Bearer jwt-2"))
			.respond_with(graphql_ok(json!({"groups": []})))
			.expect(1)
			.mount(&server)
			.await;

		let password = Secret::new("pw".to_string());
		let web_url = format!("{}/lldap", server.uri());
		let client = GraphqlDirectoryClient::login(&web_url, "admin", &password, &HttpSettings::default())
			.await
			.unwrap();

		assert!(client.query_groups().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn rejected_login_is_a_login_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/auth/simple/login"))
			.respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
			.mount(&server)
			.await;

		let password = Secret::new("wrong".to_string());
		let result =
			GraphqlDirectoryClient::login(&server.uri(), "admin", &password, &HttpSettings::default())
				.await;

		match result {
			Err(DirectoryError::Login { username, message }) => {
				assert_eq!(username, "admin");
				assert!(message.contains("401"));
				assert!(message.contains("bad credentials"));
			}
			Err(other) => panic!("expected login error, got {other}"),
			Ok(_) => panic!("expected login error"),
		}
	}

	#[tokio::test]
	async fn login_without_token_is_a_login_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/auth/simple/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
			.mount(&server)
			.await;

		let password = Secret::new("pw".to_string());
		let result =
			GraphqlDirectoryClient::login(&server.uri(), "admin", &password, &HttpSettings::default())
				.await;
		assert!(matches!(result, Err(DirectoryError::Login { .. })));
	}

	#[tokio::test]
	async fn users_include_memberships() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(body_partial_json(json!({"query": USERS_QUERY})))
			.respond_with(graphql_ok(json!({
				"users": [{
					"id": "alice",
					"email": "alice@example.com",
					"displayName": "Alice",
					"groups": [{"id": 1, "displayName": "eng"}]
				}]
			})))
			.mount(&server)
			.await;

		let users = client.query_users().await.unwrap();
		assert_eq!(users[0].id, "alice");
		assert_eq!(users[0].groups[0].display_name, "eng");
	}

	#[tokio::test]
	async fn create_group_sends_name() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(body_partial_json(json!({"variables": {"name": "eng"}})))
			.respond_with(graphql_ok(json!({
				"createGroup": {"id": 7, "displayName": "eng"}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let group = client.create_group("eng").await.unwrap();
		assert_eq!(group.id, GroupId(7));
	}

	#[tokio::test]
	async fn create_user_sends_attributes_only() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(body_partial_json(json!({
				"variables": {"user": {
					"id": "alice",
					"email": "alice@example.com",
					"displayName": "Alice"
				}}
			})))
			.respond_with(graphql_ok(json!({
				"createUser": {
					"id": "alice",
					"email": "alice@example.com",
					"displayName": "Alice",
					"groups": []
				}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let user = client
			.create_user(&NewUser {
				id: "alice".into(),
				email: "alice@example.com".into(),
				display_name: "Alice".into(),
				first_name: None,
				last_name: None,
			})
			.await
			.unwrap();
		assert!(user.groups.is_empty());
	}

	#[tokio::test]
	async fn add_user_to_group_sends_both_ids() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(body_partial_json(json!({
				"variables": {"userId": "alice", "groupId": 3}
			})))
			.respond_with(graphql_ok(json!({"addUserToGroup": {"ok": true}})))
			.expect(1)
			.mount(&server)
			.await;

		client.add_user_to_group("alice", GroupId(3)).await.unwrap();
	}

	#[tokio::test]
	async fn membership_not_ok_is_rejected() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.respond_with(graphql_ok(json!({"addUserToGroup": {"ok": false}})))
			.mount(&server)
			.await;

		let err = client.add_user_to_group("alice", GroupId(3)).await.unwrap_err();
		assert!(matches!(err, DirectoryError::Rejected { .. }));
	}

	#[tokio::test]
	async fn graphql_errors_surface_raw_response() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"data": null,
				"errors": [{"message": "Group already exists"}]
			})))
			.mount(&server)
			.await;

		match client.create_group("eng").await {
			Err(DirectoryError::Graphql {
				operation,
				messages,
				raw,
			}) => {
				assert_eq!(operation, "createGroup");
				assert_eq!(messages, vec!["Group already exists"]);
				assert!(raw.contains("Group already exists"));
			}
			other => panic!("expected GraphQL error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn http_failure_is_a_status_error() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
			.mount(&server)
			.await;

		match client.query_groups().await {
			Err(DirectoryError::Status { status, body, .. }) => {
				assert_eq!(status, 502);
				assert_eq!(body, "upstream down");
			}
			other => panic!("expected status error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn null_data_is_missing_data() {
		let server = MockServer::start().await;
		let client = logged_in(&server).await;

		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
			.mount(&server)
			.await;

		assert!(matches!(
			client.query_groups().await,
			Err(DirectoryError::MissingData { .. })
		));
	}
}
