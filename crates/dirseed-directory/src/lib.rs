// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the directory's query API.
//!
//! [`DirectoryClient`] is the seam the reconciliation engine talks to.
//! [`GraphqlDirectoryClient`] implements it against the directory's GraphQL
//! endpoint after a simple-login token exchange; [`MockDirectoryClient`] is an
//! in-memory directory for tests.

mod client;
mod error;
mod graphql;
mod http;
mod mock_client;
mod types;

pub use client::DirectoryClient;
pub use error::DirectoryError;
pub use graphql::GraphqlDirectoryClient;
pub use http::{user_agent, HttpSettings};
pub use mock_client::{DirectoryCall, MockDirectoryClient};
pub use types::{DirectoryGroup, DirectoryUser, GroupId, NewUser};
