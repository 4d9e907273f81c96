// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// curves/nist256p1: p256-backed key encoding and ECDSA

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::{Field, PrimeField};
use sha2::{Digest, Sha256};

use super::weierstrass::WeierstrassCurve;
use crate::errors::HdError;

/// Marker type wiring the shared Weierstrass derivation to p256 arithmetic.
pub(crate) struct NistP256;

impl WeierstrassCurve for NistP256 {
    fn valid_private_key(bytes: &[u8; 32]) -> bool {
        Option::<p256::NonZeroScalar>::from(p256::NonZeroScalar::from_repr((*bytes).into()))
            .is_some()
    }

    fn add_tweak(parent: &[u8; 32], tweak: &[u8; 32]) -> Option<[u8; 32]> {
        let tweak = Option::<p256::Scalar>::from(p256::Scalar::from_repr((*tweak).into()))?;
        let parent = Option::<p256::Scalar>::from(p256::Scalar::from_repr((*parent).into()))?;
        let child = parent + tweak;
        if bool::from(child.is_zero()) {
            return None;
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&child.to_repr()[..]);
        Some(out)
    }

    fn compressed_public_key(private_key: &[u8; 32]) -> Result<[u8; 33], HdError> {
        public_key_compressed(private_key)
    }
}

fn signing_key(private_key: &[u8; 32]) -> Result<SigningKey, HdError> {
    SigningKey::from_bytes(private_key.into()).map_err(|_| {
        HdError::InvalidCurveInput("private key is zero or exceeds the P-256 order".into())
    })
}

/// 33-byte compressed public key for the given private key.
pub fn public_key_compressed(private_key: &[u8; 32]) -> Result<[u8; 33], HdError> {
    let key = signing_key(private_key)?;
    let point = key.verifying_key().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// 65-byte uncompressed public key for the given private key.
pub fn public_key_uncompressed(private_key: &[u8; 32]) -> Result<[u8; 65], HdError> {
    let key = signing_key(private_key)?;
    let point = key.verifying_key().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// ECDSA signature over SHA-256 of `message`: r || s, 64 bytes.
pub fn sign(private_key: &[u8; 32], message: &[u8]) -> Result<[u8; 64], HdError> {
    let key = signing_key(private_key)?;
    let digest: [u8; 32] = Sha256::digest(message).into();
    let signature: Signature = key
        .sign_prehash(&digest)
        .map_err(|_| HdError::InvalidCurveInput("ECDSA signing failed".into()))?;
    let bytes = signature.to_bytes();
    let mut out = [0u8; 64];
    out.copy_from_slice(&bytes[..]);
    Ok(out)
}

/// Verify a 64-byte signature against a 33- or 65-byte SEC1 public key.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    let digest: [u8; 32] = Sha256::digest(message).into();
    key.verify_prehash(&digest, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn test_public_key_prefixes() {
        let compressed = public_key_compressed(&KEY).unwrap();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
        let uncompressed = public_key_uncompressed(&KEY).unwrap();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(compressed[1..], uncompressed[1..33]);
    }

    #[test]
    fn test_reject_zero_key() {
        assert!(public_key_compressed(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let signature = sign(&KEY, b"hello").unwrap();
        let public_key = public_key_compressed(&KEY).unwrap();
        assert!(verify(&public_key, b"hello", &signature));
        assert!(!verify(&public_key, b"other", &signature));
    }
}
