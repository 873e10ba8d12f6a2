// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `dirseed`: create the groups and users listed in a seed document.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use dirseed_reconcile::RunReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod error;
mod run;

use args::Args;
use error::SeedError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing(&args.log_level, args.json_logs);

	let result = run::run(&args).await;
	ExitCode::from(finish(result, &mut std::io::stdout(), &mut std::io::stderr()))
}

/// Print the summary line, or the single diagnostic for a failed run, and
/// return the process exit code.
fn finish(
	result: Result<RunReport, SeedError>,
	out: &mut impl Write,
	err_out: &mut impl Write,
) -> u8 {
	match result {
		Ok(report) => {
			let _ = writeln!(out, "seed complete: {report}");
			0
		}
		Err(err) => {
			let _ = writeln!(err_out, "error ({}): {err}", err.kind());
			err.exit_code()
		}
	}
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn init_tracing(level: &str, json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let registry = tracing_subscriber::registry().with(filter);

	if json {
		registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.init();
	} else {
		registry
			.with(
				tracing_subscriber::fmt::layer()
					.compact()
					.with_writer(std::io::stderr),
			)
			.init();
	}
}
