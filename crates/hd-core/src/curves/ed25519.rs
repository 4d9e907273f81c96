// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// curves/ed25519: ed25519-dalek-backed keys, signatures, and SLIP-0010
// derivation
//
// Every 32-byte string is a valid Ed25519 private key, so master and child
// derivation never retry. Non-hardened child indices are rejected.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use hmac::Mac;
use zeroize::Zeroize;

use super::HmacSha512;
use crate::bip44::HARDENED_OFFSET;
use crate::errors::HdError;
use crate::slip10::ExtendedKey;

pub(crate) fn master_from_seed(seed_key: &[u8], seed: &[u8]) -> ExtendedKey {
    let mut block = [0u8; 64];
    block.copy_from_slice(
        &HmacSha512::new_from_slice(seed_key)
            .expect("HMAC-SHA512 accepts keys of any length")
            .chain_update(seed)
            .finalize()
            .into_bytes()[..],
    );
    let mut private_key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    private_key.copy_from_slice(&block[..32]);
    chain_code.copy_from_slice(&block[32..]);
    block.zeroize();
    ExtendedKey {
        private_key,
        chain_code,
    }
}

pub(crate) fn derive_child(
    private_key: &mut [u8; 32],
    chain_code: &mut [u8; 32],
    index: u32,
) -> Result<(), HdError> {
    if index < HARDENED_OFFSET {
        return Err(HdError::NormalDerivationOnEd25519 { index });
    }

    let mut data = [0u8; 37];
    data[1..33].copy_from_slice(&private_key[..]);
    data[33..].copy_from_slice(&index.to_be_bytes());

    let mut block = [0u8; 64];
    block.copy_from_slice(
        &HmacSha512::new_from_slice(&chain_code[..])
            .expect("HMAC-SHA512 accepts keys of any length")
            .chain_update(&data[..])
            .finalize()
            .into_bytes()[..],
    );
    data.zeroize();

    private_key.copy_from_slice(&block[..32]);
    chain_code.copy_from_slice(&block[32..]);
    block.zeroize();
    Ok(())
}

/// 32-byte public key for the given private key.
pub fn public_key(private_key: &[u8; 32]) -> [u8; 32] {
    SigningKey::from_bytes(private_key)
        .verifying_key()
        .to_bytes()
}

/// 64-byte Ed25519 signature over `message`. Deterministic.
pub fn sign(private_key: &[u8; 32], message: &[u8]) -> [u8; 64] {
    SigningKey::from_bytes(private_key).sign(message).to_bytes()
}

/// Verify a 64-byte signature against a 32-byte public key.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    key.verify(message, &Signature::from_bytes(signature))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 8032 test vector 1 (empty message).
    const SECRET: [u8; 32] =
        hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");

    #[test]
    fn test_rfc8032_public_key() {
        assert_eq!(
            public_key(&SECRET),
            hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
        );
    }

    #[test]
    fn test_rfc8032_signature() {
        let signature = sign(&SECRET, b"");
        assert_eq!(
            signature,
            hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
            )
        );
        assert!(verify(&public_key(&SECRET), b"", &signature));
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let signature = sign(&SECRET, b"payload");
        assert!(!verify(&public_key(&SECRET), b"payload!", &signature));
    }

    #[test]
    fn test_non_hardened_child_rejected() {
        let mut key = [1u8; 32];
        let mut chain_code = [2u8; 32];
        let err = derive_child(&mut key, &mut chain_code, 5).unwrap_err();
        assert_eq!(err, HdError::NormalDerivationOnEd25519 { index: 5 });
        // Buffers are untouched on failure.
        assert_eq!(key, [1u8; 32]);
        assert_eq!(chain_code, [2u8; 32]);
    }
}
