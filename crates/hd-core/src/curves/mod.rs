// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// curves: Per-curve primitives behind a closed curve tag
//
// Submodules: secp256k1, nist256p1, ed25519, weierstrass (shared derivation)
// Enum: Curve — seed_key(), name(), master/child derivation dispatch

pub mod ed25519;
pub mod nist256p1;
pub mod secp256k1;
pub(crate) mod weierstrass;

use hmac::Hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha512;

use crate::errors::HdError;
use crate::slip10::ExtendedKey;

pub(crate) type HmacSha512 = Hmac<Sha512>;

/// Supported derivation curves. There are exactly three; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// secp256k1 (EVM, Bitcoin, Cosmos)
    Secp256k1,
    /// NIST P-256, a.k.a. secp256r1 / prime256v1
    NistP256,
    /// Ed25519 (Solana, TON); hardened derivation only
    Ed25519,
}

impl Curve {
    /// HMAC-SHA512 key for master derivation, fixed by SLIP-0010.
    pub fn seed_key(&self) -> &'static [u8] {
        match self {
            Curve::Secp256k1 => b"Bitcoin seed",
            Curve::NistP256 => b"Nist256p1 seed",
            Curve::Ed25519 => b"ed25519 seed",
        }
    }

    /// Short curve label for diagnostics. Never carries key material.
    pub fn name(&self) -> &'static str {
        match self {
            Curve::Secp256k1 => "secp256k1",
            Curve::NistP256 => "nist256p1",
            Curve::Ed25519 => "ed25519",
        }
    }

    pub(crate) fn master_from_seed(&self, seed: &[u8]) -> ExtendedKey {
        match self {
            Curve::Secp256k1 => {
                weierstrass::master_from_seed::<secp256k1::Secp256k1>(self.seed_key(), seed)
            }
            Curve::NistP256 => {
                weierstrass::master_from_seed::<nist256p1::NistP256>(self.seed_key(), seed)
            }
            Curve::Ed25519 => ed25519::master_from_seed(self.seed_key(), seed),
        }
    }

    pub(crate) fn derive_child(
        &self,
        private_key: &mut [u8; 32],
        chain_code: &mut [u8; 32],
        index: u32,
    ) -> Result<(), HdError> {
        match self {
            Curve::Secp256k1 => {
                weierstrass::derive_child::<secp256k1::Secp256k1>(private_key, chain_code, index)
            }
            Curve::NistP256 => {
                weierstrass::derive_child::<nist256p1::NistP256>(private_key, chain_code, index)
            }
            Curve::Ed25519 => ed25519::derive_child(private_key, chain_code, index),
        }
    }
}
