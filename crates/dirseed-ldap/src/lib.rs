// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

mod command_setter;
mod dn;
mod error;
mod mock_setter;
mod setter;

pub use command_setter::{LdapPasswdCommand, DEFAULT_PROGRAM};
pub use dn::{escape_dn_value, people_dn};
pub use error::PasswordError;
pub use mock_setter::{MockPasswordSetter, PasswordCall};
pub use setter::PasswordSetter;
