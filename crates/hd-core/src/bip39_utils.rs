// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip39_utils: BIP39 mnemonic validation and seed derivation
//
// Functions:
//   validate_mnemonic()  — Validate a mnemonic phrase (English wordlist)
//   mnemonic_to_seed()   — Convert mnemonic + passphrase to 64-byte seed
//
// Mnemonics are always supplied by the caller; this crate never generates
// entropy.

use bip39::Mnemonic;

use crate::errors::HdError;

/// Validate a BIP39 mnemonic phrase: 12/15/18/21/24 English words with a
/// correct SHA-256 checksum.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_in(bip39::Language::English, phrase).is_ok()
}

/// Convert a mnemonic phrase to a 64-byte seed with an optional passphrase.
///
/// Seed expansion is PBKDF2-HMAC-SHA512 over the NFKD-normalized sentence
/// with salt `"mnemonic" || passphrase` and 2048 iterations. The error for a
/// bad phrase names word positions only, never the words themselves.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<[u8; 64], HdError> {
    let mnemonic = Mnemonic::parse_in(bip39::Language::English, phrase)
        .map_err(|e| HdError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed(passphrase))
}
