// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reconciliation of directory groups and users against a seed.
//!
//! A run is a single pass:
//! 1. Snapshot current groups and users ([`ActualState::fetch`])
//! 2. Create every missing group, in name order ([`reconcile_groups`])
//! 3. Create every missing user, in id order, with its memberships and
//!    initial password ([`reconcile_users`])
//!
//! The pass is additive only. Entities that already exist are never edited,
//! and entities absent from the seed are never touched. The first failure
//! aborts the run; nothing already applied is rolled back.

mod context;
mod engine;
mod error;
mod groups;
mod report;
mod snapshot;
mod users;

pub use context::RunContext;
pub use engine::Reconciler;
pub use error::{ErrorKind, ReconcileError};
pub use groups::reconcile_groups;
pub use report::RunReport;
pub use snapshot::{ActualState, GroupMap, UserMap};
pub use users::{create_user, reconcile_users, resolve_user, ResolvedUser};
