// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// curves/secp256k1: k256-backed key encoding and ECDSA
//
// Functions:
//   public_key_compressed()   — 33-byte SEC1 (parity prefix 0x02/0x03)
//   public_key_uncompressed() — 65-byte SEC1 (0x04 prefix)
//   sign() / verify()         — ECDSA over SHA-256(message), low-s
//   sign_recoverable()        — r || s || v, v in {0, 1}
//   recover_public_key()      — inverse of sign_recoverable()

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::PrimeField;
use sha2::{Digest, Sha256};

use super::weierstrass::WeierstrassCurve;
use crate::errors::HdError;

/// Marker type wiring the shared Weierstrass derivation to k256 arithmetic.
pub(crate) struct Secp256k1;

impl WeierstrassCurve for Secp256k1 {
    fn valid_private_key(bytes: &[u8; 32]) -> bool {
        Option::<k256::NonZeroScalar>::from(k256::NonZeroScalar::from_repr((*bytes).into()))
            .is_some()
    }

    fn add_tweak(parent: &[u8; 32], tweak: &[u8; 32]) -> Option<[u8; 32]> {
        let tweak = Option::<k256::Scalar>::from(k256::Scalar::from_repr((*tweak).into()))?;
        let parent = Option::<k256::Scalar>::from(k256::Scalar::from_repr((*parent).into()))?;
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
        HdError::InvalidCurveInput("private key is zero or exceeds the secp256k1 order".into())
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

/// ECDSA signature over SHA-256 of `message`: r || s, 64 bytes, low-s.
pub fn sign(private_key: &[u8; 32], message: &[u8]) -> Result<[u8; 64], HdError> {
    let key = signing_key(private_key)?;
    let digest: [u8; 32] = Sha256::digest(message).into();
    let signature: Signature = key
        .sign_prehash(&digest)
        .map_err(|_| HdError::InvalidCurveInput("ECDSA signing failed".into()))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    let bytes = signature.to_bytes();
    let mut out = [0u8; 64];
    out.copy_from_slice(&bytes[..]);
    Ok(out)
}

/// Recoverable ECDSA signature: r || s || v with v the raw recovery id.
pub fn sign_recoverable(private_key: &[u8; 32], message: &[u8]) -> Result<[u8; 65], HdError> {
    let key = signing_key(private_key)?;
    let digest: [u8; 32] = Sha256::digest(message).into();
    let (signature, recovery_id): (Signature, RecoveryId) = key
        .sign_prehash(&digest)
        .map_err(|_| HdError::InvalidCurveInput("ECDSA signing failed".into()))?;
    let bytes = signature.to_bytes();
    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&bytes[..]);
    out[64] = recovery_id.to_byte();
    Ok(out)
}

/// Recover the 33-byte compressed public key from a recoverable signature.
pub fn recover_public_key(message: &[u8], signature: &[u8; 65]) -> Result<[u8; 33], HdError> {
    let recovery_id = RecoveryId::try_from(signature[64])
        .map_err(|_| HdError::InvalidCurveInput("recovery id out of range".into()))?;
    let signature = Signature::from_slice(&signature[..64])
        .map_err(|_| HdError::InvalidCurveInput("malformed signature".into()))?;
    let digest: [u8; 32] = Sha256::digest(message).into();
    let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|_| HdError::InvalidCurveInput("public key recovery failed".into()))?;
    let point = key.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
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
