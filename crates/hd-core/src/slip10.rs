// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// slip10: Master derivation and path walking over any supported curve
//
// Types:
//   ExtendedKey — 32-byte private key + 32-byte chain code, wiped on drop
// Functions:
//   derive_master()    — seed → master key (infallible)
//   derive_path()      — seed + indices → terminal child
//   derive_path_str()  — seed + "m/…" text → terminal child
//   try_*              — boolean out-parameter variants, no allocation

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bip44::{self, DerivationPath};
use crate::curves::Curve;
use crate::errors::HdError;

const KEY_LEN: usize = 32;

/// A derived private key and its chain code. Both halves are secret; the
/// buffers are zeroized when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    pub private_key: [u8; 32],
    pub chain_code: [u8; 32],
}

/// Custom Debug: never prints key material.
impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private_key", &"[32 bytes REDACTED]")
            .field("chain_code", &"[32 bytes REDACTED]")
            .finish()
    }
}

impl ExtendedKey {
    /// Copy both halves into caller-provided buffers, which must each be
    /// exactly 32 bytes.
    pub fn copy_to(
        &self,
        private_key_out: &mut [u8],
        chain_code_out: &mut [u8],
    ) -> Result<(), HdError> {
        if private_key_out.len() != KEY_LEN {
            return Err(HdError::BufferTooSmall {
                expected: KEY_LEN,
                actual: private_key_out.len(),
            });
        }
        if chain_code_out.len() != KEY_LEN {
            return Err(HdError::BufferTooSmall {
                expected: KEY_LEN,
                actual: chain_code_out.len(),
            });
        }
        private_key_out.copy_from_slice(&self.private_key);
        chain_code_out.copy_from_slice(&self.chain_code);
        Ok(())
    }
}

/// Derive the master key for `curve` from a raw seed. BIP39 seeds are 64
/// bytes; the SLIP-0010 vectors use seeds as short as 16. Deterministic and
/// infallible: out-of-range candidates are absorbed by the curve's retry
/// loop.
pub fn derive_master(curve: Curve, seed: &[u8]) -> ExtendedKey {
    tracing::trace!(curve = curve.name(), "deriving master key");
    curve.master_from_seed(seed)
}

/// Derive the key at `path`, which must contain at least one index. The walk
/// reuses one key/chain-code pair in place; intermediate parents never
/// outlive their derivation step.
pub fn derive_path(curve: Curve, seed: &[u8], path: &[u32]) -> Result<ExtendedKey, HdError> {
    if path.is_empty() {
        return Err(HdError::InvalidPath(
            "derivation path must contain at least one index".into(),
        ));
    }
    tracing::trace!(curve = curve.name(), depth = path.len(), "deriving key along path");
    let mut key = curve.master_from_seed(seed);
    for &index in path {
        curve.derive_child(&mut key.private_key, &mut key.chain_code, index)?;
    }
    Ok(key)
}

/// Derive the key at a textual path such as `"m/44'/60'/0'/0/0"`. The text
/// is parsed with the BIP44 codec, so `"m"` alone is rejected here like any
/// other empty path.
pub fn derive_path_str(curve: Curve, seed: &[u8], path: &str) -> Result<ExtendedKey, HdError> {
    let path = DerivationPath::parse(path)?;
    derive_path(curve, seed, path.indices())
}

/// Out-parameter master derivation. False when either buffer is not exactly
/// 32 bytes; the buffers are only written on success.
pub fn try_derive_master(
    curve: Curve,
    seed: &[u8],
    private_key_out: &mut [u8],
    chain_code_out: &mut [u8],
) -> bool {
    if private_key_out.len() != KEY_LEN || chain_code_out.len() != KEY_LEN {
        return false;
    }
    derive_master(curve, seed)
        .copy_to(private_key_out, chain_code_out)
        .is_ok()
}

/// Out-parameter path derivation over numeric indices.
pub fn try_derive_path(
    curve: Curve,
    seed: &[u8],
    path: &[u32],
    private_key_out: &mut [u8],
    chain_code_out: &mut [u8],
) -> bool {
    if private_key_out.len() != KEY_LEN || chain_code_out.len() != KEY_LEN || path.is_empty() {
        return false;
    }
    let mut key = curve.master_from_seed(seed);
    for &index in path {
        if curve
            .derive_child(&mut key.private_key, &mut key.chain_code, index)
            .is_err()
        {
            return false;
        }
    }
    key.copy_to(private_key_out, chain_code_out).is_ok()
}

/// Out-parameter path derivation over path text. Streams the segments
/// directly into the child walk, so no index array is ever allocated.
pub fn try_derive_path_str(
    curve: Curve,
    seed: &[u8],
    path: &str,
    private_key_out: &mut [u8],
    chain_code_out: &mut [u8],
) -> bool {
    if private_key_out.len() != KEY_LEN || chain_code_out.len() != KEY_LEN {
        return false;
    }
    let Ok(segments) = bip44::segments(path) else {
        return false;
    };
    let mut key = curve.master_from_seed(seed);
    let mut depth = 0usize;
    for segment in segments {
        let Ok(index) = segment else {
            return false;
        };
        if curve
            .derive_child(&mut key.private_key, &mut key.chain_code, index)
            .is_err()
        {
            return false;
        }
        depth += 1;
    }
    if depth == 0 {
        return false;
    }
    key.copy_to(private_key_out, chain_code_out).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip44::HARDENED_OFFSET;
    use hex_literal::hex;

    const SEED: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

    #[test]
    fn test_master_is_deterministic() {
        for curve in [Curve::Secp256k1, Curve::NistP256, Curve::Ed25519] {
            let first = derive_master(curve, &SEED);
            let second = derive_master(curve, &SEED);
            assert_eq!(first.private_key, second.private_key);
            assert_eq!(first.chain_code, second.chain_code);
        }
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            derive_path(Curve::Secp256k1, &SEED, &[]),
            Err(HdError::InvalidPath(_))
        ));
        assert!(matches!(
            derive_path_str(Curve::Secp256k1, &SEED, "m"),
            Err(HdError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_text_and_indices_agree() {
        let by_text = derive_path_str(Curve::Secp256k1, &SEED, "m/0'/1").unwrap();
        let by_indices = derive_path(Curve::Secp256k1, &SEED, &[HARDENED_OFFSET, 1]).unwrap();
        assert_eq!(by_text.private_key, by_indices.private_key);
        assert_eq!(by_text.chain_code, by_indices.chain_code);
    }

    #[test]
    fn test_hardened_child_vector() {
        let key = derive_path(Curve::Secp256k1, &SEED, &[HARDENED_OFFSET]).unwrap();
        assert_eq!(
            key.private_key,
            hex!("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
        );
        assert_eq!(
            key.chain_code,
            hex!("47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141")
        );
    }

    #[test]
    fn test_ed25519_rejects_normal_index_at_any_position() {
        let err = derive_path(Curve::Ed25519, &SEED, &[0]).unwrap_err();
        assert_eq!(err, HdError::NormalDerivationOnEd25519 { index: 0 });
        let err =
            derive_path(Curve::Ed25519, &SEED, &[HARDENED_OFFSET, 7]).unwrap_err();
        assert_eq!(err, HdError::NormalDerivationOnEd25519 { index: 7 });
    }

    #[test]
    fn test_try_master_matches_raising_form() {
        let mut private_key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        assert!(try_derive_master(
            Curve::Secp256k1,
            &SEED,
            &mut private_key,
            &mut chain_code
        ));
        let key = derive_master(Curve::Secp256k1, &SEED);
        assert_eq!(private_key, key.private_key);
        assert_eq!(chain_code, key.chain_code);
    }

    #[test]
    fn test_try_forms_reject_bad_buffers() {
        let mut short = [0u8; 31];
        let mut long = [0u8; 33];
        let mut ok = [0u8; 32];
        assert!(!try_derive_master(Curve::Secp256k1, &SEED, &mut short, &mut ok));
        assert!(!try_derive_master(Curve::Secp256k1, &SEED, &mut ok, &mut long));
        let mut out = [0u8; 32];
        assert!(!try_derive_path(
            Curve::Secp256k1,
            &SEED,
            &[],
            &mut out,
            &mut ok
        ));
    }

    #[test]
    fn test_try_path_str_streams_without_index_buffer() {
        let mut private_key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        assert!(try_derive_path_str(
            Curve::Secp256k1,
            &SEED,
            "m/0'/1/2'",
            &mut private_key,
            &mut chain_code
        ));
        let key = derive_path_str(Curve::Secp256k1, &SEED, "m/0'/1/2'").unwrap();
        assert_eq!(private_key, key.private_key);
        assert_eq!(chain_code, key.chain_code);

        assert!(!try_derive_path_str(
            Curve::Secp256k1,
            &SEED,
            "m",
            &mut private_key,
            &mut chain_code
        ));
        assert!(!try_derive_path_str(
            Curve::Secp256k1,
            &SEED,
            "m/",
            &mut private_key,
            &mut chain_code
        ));
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let key = derive_master(Curve::Secp256k1, &SEED);
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("e8f32e72"));
    }
}
