// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use zeroize::Zeroizing;

use crate::{Secret, SecretString};

/// Read a whole credential file into a [`SecretString`].
///
/// The content is kept byte-for-byte, trailing newline included, so the value
/// matches what `ldappasswd -y` reads from the same file. The read buffer is
/// wiped whether decoding succeeds or not.
pub fn read_secret_file(path: &Path) -> io::Result<SecretString> {
	let mut file = File::open(path)?;
	let size_hint = usize::try_from(file.metadata()?.len()).unwrap_or(0);
	let buf = read_wiped(&mut file, size_hint)?;

	let text = std::str::from_utf8(&buf).map_err(|_| {
		io::Error::new(
			io::ErrorKind::InvalidData,
			format!("{} is not valid UTF-8", path.display()),
		)
	})?;

	Ok(Secret::new(text.to_owned()))
}

/// Read `reader` to the end into a buffer sized up front, so the content
/// lands in one allocation that is wiped on drop.
fn read_wiped(reader: &mut impl Read, size_hint: usize) -> io::Result<Zeroizing<Vec<u8>>> {
	let mut buf = Zeroizing::new(Vec::with_capacity(size_hint));
	reader.read_to_end(&mut buf)?;
	Ok(buf)
}
