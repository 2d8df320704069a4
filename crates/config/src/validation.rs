// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::SetupError;

/// Adds the `0x` prefix when missing and checks the key is 32 bytes of hex.
///
/// `source` names where the key came from so the error is actionable without
/// echoing the key itself.
pub fn normalize_private_key(key: &str, source: &'static str) -> Result<String, SetupError> {
    let key = key.trim();
    let key = if key.starts_with("0x") {
        key.to_string()
    } else {
        format!("0x{key}")
    };
    if key.len() != 66 || !key[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SetupError::InvalidPrivateKey(source));
    }
    Ok(key)
}
