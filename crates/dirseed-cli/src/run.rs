// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirseed_common_secret::read_secret_file;
use dirseed_config::{ensure_readable_file, SeedConfig};
use dirseed_directory::GraphqlDirectoryClient;
use dirseed_ldap::LdapPasswdCommand;
use dirseed_reconcile::{Reconciler, RunReport};
use tracing::info;

use crate::args::Args;
use crate::error::SeedError;

/// Load the seed, authenticate, then reconcile.
///
/// Configuration and credential problems are reported before any network
/// call. The administrator password is held only for the login request.
pub async fn run(args: &Args) -> Result<RunReport, SeedError> {
	let config = SeedConfig::load(&args.config)?;
	ensure_readable_file("Admin password file", &args.admin_password_file)?;
	info!(
		config = %args.config.display(),
		web_url = %config.web_url,
		ldap_url = %config.ldap_url,
		"loaded seed configuration"
	);

	let directory = {
		let password = read_secret_file(&args.admin_password_file).map_err(|source| {
			SeedError::AdminPassword {
				path: args.admin_password_file.clone(),
				source,
			}
		})?;
		GraphqlDirectoryClient::login(
			&config.web_url,
			&config.admin_username,
			&password,
			&args.http_settings(),
		)
		.await
		.map_err(SeedError::Authentication)?
	};
	info!(username = %config.admin_username, "authenticated to directory");

	let passwords = LdapPasswdCommand::new(
		&config.ldap_url,
		&config.admin_username,
		&args.admin_password_file,
		&config.base_dn,
	)
	.with_program(&args.ldappasswd);

	let report = Reconciler::new(directory, passwords)
		.run(&config.seed)
		.await?;
	Ok(report)
}

#[cfg(test)]
mod tests {
	use std::path::{Path, PathBuf};

	use serde_json::json;
	use tempfile::TempDir;
	use wiremock::matchers::{body_string_contains, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	use super::*;
	use crate::error::FailureKind;

	fn write_config(dir: &Path, web_url: &str, seed: serde_json::Value) -> PathBuf {
		let config = json!({
			"admin_username": "admin",
			"ldap_url": "ldap://127.0.0.1:3890",
			"web_url": web_url,
			"base_dn": "dc=example,dc=com",
			"seed": seed,
		});
		let path = dir.join("config_file.json");
		std::fs::write(&path, config.to_string()).unwrap();
		path
	}

	fn args(dir: &TempDir, config: PathBuf) -> Args {
		let admin_password_file = dir.path().join("admin_password");
		std::fs::write(&admin_password_file, "hunter2").unwrap();
		Args {
			config,
			admin_password_file,
			ldappasswd: PathBuf::from("/nonexistent/ldappasswd"),
			http_timeout_secs: 5,
			log_level: "info".to_string(),
			json_logs: false,
		}
	}

	#[tokio::test]
	async fn missing_config_is_a_configuration_failure() {
		let dir = TempDir::new().unwrap();
		let args = args(&dir, dir.path().join("absent.json"));

		let err = run(&args).await.unwrap_err();
		assert_eq!(err.kind(), FailureKind::Configuration);
		assert!(err.to_string().contains("does not exist"));
	}

	#[tokio::test]
	async fn missing_admin_password_fails_before_login() {
		let server = MockServer::start().await;
		let dir = TempDir::new().unwrap();
		let config = write_config(dir.path(), &server.uri(), json!({"groups": ["eng"]}));
		let mut args = args(&dir, config);
		args.admin_password_file = dir.path().join("absent");

		let err = run(&args).await.unwrap_err();
		assert_eq!(err.exit_code(), 2);
		assert!(server.received_requests().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn unparsable_web_url_is_a_configuration_failure() {
		let dir = TempDir::new().unwrap();
		let config = write_config(dir.path(), "not a url", json!({"groups": ["eng"]}));

		let err = run(&args(&dir, config)).await.unwrap_err();
		assert_eq!(err.kind(), FailureKind::Configuration);
		assert_eq!(err.exit_code(), 2);
		assert!(err.to_string().contains("web_url"));
	}

	#[tokio::test]
	async fn rejected_login_is_an_authentication_failure() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/auth/simple/login"))
			.respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
			.mount(&server)
			.await;
		let dir = TempDir::new().unwrap();
		let config = write_config(dir.path(), &server.uri(), json!({"groups": ["eng"]}));

		let err = run(&args(&dir, config)).await.unwrap_err();
		assert_eq!(err.kind(), FailureKind::Authentication);
		assert_eq!(err.exit_code(), 3);
	}

	#[tokio::test]
	async fn converged_directory_reports_counts() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/auth/simple/login"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt"})))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(header("Authorization", "Bearer jwt"))
			.and(body_string_contains("ListGroups"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"data": {"groups": [{"id": 1, "displayName": "eng"}]}
			})))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/api/graphql"))
			.and(body_string_contains("ListUsers"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"data": {"users": [{
					"id": "alice",
					"email": "alice@example.com",
					"displayName": "Alice",
					"groups": []
				}]}
			})))
			.mount(&server)
			.await;

		let dir = TempDir::new().unwrap();
		let config = write_config(
			dir.path(),
			&server.uri(),
			json!({
				"groups": ["eng"],
				"users": [{
					"id": "alice",
					"email": "alice@example.com",
					"displayName": "Alice",
					"groups": ["eng"],
					"password_file": "/run/secrets/alice"
				}]
			}),
		);

		let report = run(&args(&dir, config)).await.unwrap();
		assert_eq!((report.groups, report.users), (1, 1));
		assert!(!report.mutations_applied());
		assert_eq!(server.received_requests().await.unwrap().len(), 3);
	}
}
