// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// weierstrass: BIP32/SLIP-0010 master and child derivation shared by
// secp256k1 and NIST P-256
//
// Trait: WeierstrassCurve — scalar range checks and tweak addition mod n

use hmac::Mac;
use zeroize::Zeroize;

use super::HmacSha512;
use crate::bip44::HARDENED_OFFSET;
use crate::errors::HdError;
use crate::slip10::ExtendedKey;

/// Scalar arithmetic a Weierstrass curve must supply for derivation.
/// Implemented by zero-sized markers over the k256 / p256 backends.
pub(crate) trait WeierstrassCurve {
    /// True when `bytes` is a big-endian scalar in `[1, n)`.
    fn valid_private_key(bytes: &[u8; 32]) -> bool;

    /// `(tweak + parent) mod n`. None when `tweak` is at or above the curve
    /// order or the sum is zero; both cases send the caller back around the
    /// retry loop.
    fn add_tweak(parent: &[u8; 32], tweak: &[u8; 32]) -> Option<[u8; 32]>;

    /// 33-byte SEC1 compressed public key for the given private scalar.
    fn compressed_public_key(private_key: &[u8; 32]) -> Result<[u8; 33], HdError>;
}

/// Master derivation: `I = HMAC-SHA512(seed_key, seed)`, retried over `I`
/// itself until the left half is a scalar in `[1, n)`.
pub(crate) fn master_from_seed<C: WeierstrassCurve>(seed_key: &[u8], seed: &[u8]) -> ExtendedKey {
    let hmac = HmacSha512::new_from_slice(seed_key)
        .expect("HMAC-SHA512 accepts keys of any length");
    let mut block = [0u8; 64];
    block.copy_from_slice(&hmac.clone().chain_update(seed).finalize().into_bytes()[..]);

    loop {
        let mut candidate = [0u8; 32];
        candidate.copy_from_slice(&block[..32]);
        if C::valid_private_key(&candidate) {
            let mut chain_code = [0u8; 32];
            chain_code.copy_from_slice(&block[32..]);
            block.zeroize();
            return ExtendedKey {
                private_key: candidate,
                chain_code,
            };
        }
        candidate.zeroize();
        let next = hmac.clone().chain_update(&block[..]).finalize().into_bytes();
        block.copy_from_slice(&next[..]);
    }
}

/// Child derivation at `index`, in place over the parent key and chain code.
///
/// Hardened data is `0x00 || key || index`; non-hardened data is the
/// compressed parent public key followed by the index. When the left HMAC
/// half is unusable the data is re-keyed as `0x01 || I_R || index`.
pub(crate) fn derive_child<C: WeierstrassCurve>(
    private_key: &mut [u8; 32],
    chain_code: &mut [u8; 32],
    index: u32,
) -> Result<(), HdError> {
    if !C::valid_private_key(private_key) {
        return Err(HdError::InvalidCurveInput(
            "parent private key is outside the curve order".into(),
        ));
    }

    let mut data = [0u8; 37];
    if index >= HARDENED_OFFSET {
        data[1..33].copy_from_slice(&private_key[..]);
    } else {
        data[..33].copy_from_slice(&C::compressed_public_key(private_key)?);
    }
    data[33..].copy_from_slice(&index.to_be_bytes());

    let hmac = HmacSha512::new_from_slice(&chain_code[..])
        .expect("HMAC-SHA512 accepts keys of any length");
    let mut block = [0u8; 64];
    block.copy_from_slice(&hmac.clone().chain_update(&data[..]).finalize().into_bytes()[..]);
    data.zeroize();

    loop {
        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(&block[..32]);
        let accepted = C::add_tweak(private_key, &tweak);
        tweak.zeroize();

        match accepted {
            Some(mut child) => {
                private_key.copy_from_slice(&child);
                chain_code.copy_from_slice(&block[32..]);
                child.zeroize();
                block.zeroize();
                return Ok(());
            }
            None => {
                let mut retry = [0u8; 37];
                retry[0] = 0x01;
                retry[1..33].copy_from_slice(&block[32..]);
                retry[33..].copy_from_slice(&index.to_be_bytes());
                let next = hmac.clone().chain_update(&retry[..]).finalize().into_bytes();
                block.copy_from_slice(&next[..]);
                retry.zeroize();
            }
        }
    }
}
