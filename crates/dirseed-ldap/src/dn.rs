// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Distinguished-name construction for entries under `ou=people`.

/// Escape an attribute value for use inside a DN (RFC 4514 section 2.4).
pub fn escape_dn_value(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	let last = value.chars().count().saturating_sub(1);

	for (i, c) in value.chars().enumerate() {
		match c {
			'"' | '+' | ',' | ';' | '<' | '>' | '\\' | '=' => {
				out.push('\\');
				out.push(c);
			}
			'\0' => out.push_str("\\00"),
			'#' if i == 0 => out.push_str("\\#"),
			' ' if i == 0 || i == last => out.push_str("\\ "),
			_ => out.push(c),
		}
	}

	out
}

/// `uid=<uid>,ou=people,<base_dn>`.
pub fn people_dn(uid: &str, base_dn: &str) -> String {
	format!("uid={},ou=people,{base_dn}", escape_dn_value(uid))
}
