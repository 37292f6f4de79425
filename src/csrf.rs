// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Double-submit CSRF token validation.
//!
//! State-changing endpoints require the same token in the JSON body and in
//! the `x-csrf-token` request header. Tokens are compared through their
//! SHA-256 digests so the comparison does not short-circuit on
//! attacker-controlled length.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Mint a fresh CSRF token: 32 random bytes, base64url without padding.
#[must_use]
pub fn issue_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Validate the body token against the request header token.
///
/// Both must be present and non-empty, and equal byte for byte.
#[must_use]
pub fn validate_token(body_token: &str, header_token: Option<&str>) -> bool {
    let Some(header_token) = header_token else {
        return false;
    };
    if body_token.is_empty() || header_token.is_empty() {
        return false;
    }
    Sha256::digest(body_token.as_bytes()) == Sha256::digest(header_token.as_bytes())
}

#[cfg(test)]
#[path = "csrf_tests.rs"]
mod csrf_tests;
