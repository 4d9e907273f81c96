// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// errors: Typed failure kinds shared across the crate
//
// Messages may name a path index or segment position, never key, chain-code,
// seed, or mnemonic bytes.

use std::fmt;

/// Failure kinds for derivation, parsing, and signing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HdError {
    /// Malformed path text, index past the hardening offset, or an empty
    /// path where at least one index is required.
    InvalidPath(String),
    /// Wrong word count, unknown word, or checksum mismatch.
    InvalidMnemonic(String),
    /// A non-hardened index was requested for Ed25519, which only supports
    /// hardened derivation.
    NormalDerivationOnEd25519 {
        /// The offending path index.
        index: u32,
    },
    /// A destination buffer does not match the required fixed size.
    BufferTooSmall {
        /// Required length in bytes.
        expected: usize,
        /// Length of the buffer that was supplied.
        actual: usize,
    },
    /// Key material rejected by the curve backend. Unreachable through the
    /// derivation retry loops; surfaces only for caller-supplied keys.
    InvalidCurveInput(String),
}

impl fmt::Display for HdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HdError::InvalidPath(msg) => write!(f, "invalid derivation path: {}", msg),
            HdError::InvalidMnemonic(msg) => write!(f, "invalid mnemonic: {}", msg),
            HdError::NormalDerivationOnEd25519 { index } => write!(
                f,
                "ed25519 requires hardened derivation, index {} is non-hardened",
                index
            ),
            HdError::BufferTooSmall { expected, actual } => write!(
                f,
                "destination buffer holds {} bytes, exactly {} required",
                actual, expected
            ),
            HdError::InvalidCurveInput(msg) => write!(f, "invalid curve input: {}", msg),
        }
    }
}

impl std::error::Error for HdError {}
