// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// wallet: Signing facades over derived keys
//
// Types:
//   EdwardsWallet     — Ed25519 private key + 32-byte public key
//   WeierstrassWallet — secp256k1 / P-256 private key + both SEC1 encodings
//
// Public keys are materialized once at construction. EVM-style consumers
// hash the uncompressed encoding, Cosmos-style consumers the compressed one.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bip39_utils;
use crate::bip44::DerivationPath;
use crate::curves::{self, Curve};
use crate::errors::HdError;
use crate::slip10;

const SIGNATURE_LEN: usize = 64;
const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Ed25519 signing wallet. Key buffers are zeroized on drop; the wallet is
/// write-once after construction and safe to share across readers.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EdwardsWallet {
    #[zeroize(skip)]
    curve: Curve,
    private_key: [u8; 32],
    public_key: [u8; 32],
}

impl EdwardsWallet {
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        let public_key = curves::ed25519::public_key(&private_key);
        Self {
            curve: Curve::Ed25519,
            private_key,
            public_key,
        }
    }

    pub fn from_seed(seed: &[u8], path: &DerivationPath) -> Result<Self, HdError> {
        let key = slip10::derive_path(Curve::Ed25519, seed, path.indices())?;
        tracing::debug!(curve = "ed25519", depth = path.len(), "derived wallet key");
        Ok(Self::from_private_key(key.private_key))
    }

    pub fn from_seed_path(seed: &[u8], path: &str) -> Result<Self, HdError> {
        Self::from_seed(seed, &DerivationPath::parse(path)?)
    }

    pub fn from_mnemonic(
        mnemonic: &str,
        passphrase: &str,
        path: &DerivationPath,
    ) -> Result<Self, HdError> {
        let mut seed = bip39_utils::mnemonic_to_seed(mnemonic, passphrase)?;
        let wallet = Self::from_seed(&seed, path);
        seed.zeroize();
        wallet
    }

    pub fn from_mnemonic_path(
        mnemonic: &str,
        passphrase: &str,
        path: &str,
    ) -> Result<Self, HdError> {
        Self::from_mnemonic(mnemonic, passphrase, &DerivationPath::parse(path)?)
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// 64-byte deterministic Ed25519 signature over `data`.
    pub fn sign(&self, data: &[u8]) -> [u8; 64] {
        curves::ed25519::sign(&self.private_key, data)
    }

    /// Out-parameter signing; false unless the buffer is exactly 64 bytes.
    pub fn try_sign(&self, data: &[u8], signature_out: &mut [u8]) -> bool {
        if signature_out.len() != SIGNATURE_LEN {
            return false;
        }
        signature_out.copy_from_slice(&self.sign(data));
        true
    }

    pub fn verify(&self, data: &[u8], signature: &[u8; 64]) -> bool {
        curves::ed25519::verify(&self.public_key, data, signature)
    }
}

impl fmt::Debug for EdwardsWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsWallet")
            .field("curve", &self.curve)
            .field("private_key", &"[32 bytes REDACTED]")
            .field("public_key", &hex::encode(self.public_key))
            .finish()
    }
}

/// secp256k1 / NIST P-256 signing wallet with both public-key encodings
/// precomputed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WeierstrassWallet {
    #[zeroize(skip)]
    curve: Curve,
    private_key: [u8; 32],
    public_key_compressed: [u8; 33],
    public_key_uncompressed: [u8; 65],
}

impl WeierstrassWallet {
    /// Build from an existing private key, validating `1 <= k < n`. Ed25519
    /// is not a Weierstrass curve and is rejected.
    pub fn from_private_key(curve: Curve, private_key: [u8; 32]) -> Result<Self, HdError> {
        let (public_key_compressed, public_key_uncompressed) = match curve {
            Curve::Secp256k1 => (
                curves::secp256k1::public_key_compressed(&private_key)?,
                curves::secp256k1::public_key_uncompressed(&private_key)?,
            ),
            Curve::NistP256 => (
                curves::nist256p1::public_key_compressed(&private_key)?,
                curves::nist256p1::public_key_uncompressed(&private_key)?,
            ),
            Curve::Ed25519 => {
                return Err(HdError::InvalidCurveInput(
                    "ed25519 keys belong in EdwardsWallet".into(),
                ))
            }
        };
        Ok(Self {
            curve,
            private_key,
            public_key_compressed,
            public_key_uncompressed,
        })
    }

    pub fn from_seed(curve: Curve, seed: &[u8], path: &DerivationPath) -> Result<Self, HdError> {
        let key = slip10::derive_path(curve, seed, path.indices())?;
        tracing::debug!(curve = curve.name(), depth = path.len(), "derived wallet key");
        Self::from_private_key(curve, key.private_key)
    }

    pub fn from_seed_path(curve: Curve, seed: &[u8], path: &str) -> Result<Self, HdError> {
        Self::from_seed(curve, seed, &DerivationPath::parse(path)?)
    }

    pub fn from_mnemonic(
        curve: Curve,
        mnemonic: &str,
        passphrase: &str,
        path: &DerivationPath,
    ) -> Result<Self, HdError> {
        let mut seed = bip39_utils::mnemonic_to_seed(mnemonic, passphrase)?;
        let wallet = Self::from_seed(curve, &seed, path);
        seed.zeroize();
        wallet
    }

    pub fn from_mnemonic_path(
        curve: Curve,
        mnemonic: &str,
        passphrase: &str,
        path: &str,
    ) -> Result<Self, HdError> {
        Self::from_mnemonic(curve, mnemonic, passphrase, &DerivationPath::parse(path)?)
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn public_key_compressed(&self) -> &[u8; 33] {
        &self.public_key_compressed
    }

    pub fn public_key_uncompressed(&self) -> &[u8; 65] {
        &self.public_key_uncompressed
    }

    /// 64-byte ECDSA signature (r || s) over SHA-256 of `data`.
    pub fn sign(&self, data: &[u8]) -> Result<[u8; 64], HdError> {
        match self.curve {
            Curve::Secp256k1 => curves::secp256k1::sign(&self.private_key, data),
            Curve::NistP256 => curves::nist256p1::sign(&self.private_key, data),
            Curve::Ed25519 => Err(HdError::InvalidCurveInput(
                "ed25519 keys belong in EdwardsWallet".into(),
            )),
        }
    }

    /// 65-byte recoverable signature (r || s || v). secp256k1 only.
    pub fn sign_recoverable(&self, data: &[u8]) -> Result<[u8; 65], HdError> {
        match self.curve {
            Curve::Secp256k1 => curves::secp256k1::sign_recoverable(&self.private_key, data),
            _ => Err(HdError::InvalidCurveInput(
                "recoverable signatures require secp256k1".into(),
            )),
        }
    }

    /// Out-parameter signing; false unless the buffer is exactly 64 bytes.
    pub fn try_sign(&self, data: &[u8], signature_out: &mut [u8]) -> bool {
        if signature_out.len() != SIGNATURE_LEN {
            return false;
        }
        match self.sign(data) {
            Ok(signature) => {
                signature_out.copy_from_slice(&signature);
                true
            }
            Err(_) => false,
        }
    }

    /// Out-parameter recoverable signing; false unless the buffer is exactly
    /// 65 bytes.
    pub fn try_sign_recoverable(&self, data: &[u8], signature_out: &mut [u8]) -> bool {
        if signature_out.len() != RECOVERABLE_SIGNATURE_LEN {
            return false;
        }
        match self.sign_recoverable(data) {
            Ok(signature) => {
                signature_out.copy_from_slice(&signature);
                true
            }
            Err(_) => false,
        }
    }

    pub fn verify(&self, data: &[u8], signature: &[u8; 64]) -> bool {
        match self.curve {
            Curve::Secp256k1 => {
                curves::secp256k1::verify(&self.public_key_compressed, data, signature)
            }
            Curve::NistP256 => {
                curves::nist256p1::verify(&self.public_key_compressed, data, signature)
            }
            Curve::Ed25519 => false,
        }
    }
}

impl fmt::Debug for WeierstrassWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeierstrassWallet")
            .field("curve", &self.curve)
            .field("private_key", &"[32 bytes REDACTED]")
            .field("public_key_compressed", &hex::encode(self.public_key_compressed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_edwards_rfc8032_vector() {
        let wallet = EdwardsWallet::from_private_key(hex!(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"
        ));
        assert_eq!(
            wallet.public_key(),
            &hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
        );
        let signature = wallet.sign(b"");
        assert_eq!(
            signature,
            hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
            )
        );
        assert!(wallet.verify(b"", &signature));
    }

    #[test]
    fn test_edwards_mnemonic_and_seed_agree() {
        let path = DerivationPath::solana(0);
        let by_mnemonic = EdwardsWallet::from_mnemonic(MNEMONIC, "", &path).unwrap();
        let seed = crate::bip39_utils::mnemonic_to_seed(MNEMONIC, "").unwrap();
        let by_seed = EdwardsWallet::from_seed(&seed, &path).unwrap();
        assert_eq!(by_mnemonic.private_key(), by_seed.private_key());
        assert_eq!(by_mnemonic.public_key(), by_seed.public_key());
    }

    #[test]
    fn test_edwards_rejects_non_hardened_path() {
        let err = EdwardsWallet::from_mnemonic_path(MNEMONIC, "", "m/44'/501'/0'/0").unwrap_err();
        assert!(matches!(err, HdError::NormalDerivationOnEd25519 { .. }));
    }

    #[test]
    fn test_edwards_try_sign_buffer_checks() {
        let wallet = EdwardsWallet::from_mnemonic_path(MNEMONIC, "", "m/44'/501'/0'/0'").unwrap();
        let mut wrong = [0u8; 63];
        assert!(!wallet.try_sign(b"data", &mut wrong));
        let mut out = [0u8; 64];
        assert!(wallet.try_sign(b"data", &mut out));
        assert_eq!(out, wallet.sign(b"data"));
    }

    #[test]
    fn test_weierstrass_sign_verify_round_trip() {
        for curve in [Curve::Secp256k1, Curve::NistP256] {
            let wallet =
                WeierstrassWallet::from_mnemonic_path(curve, MNEMONIC, "", "m/44'/60'/0'/0/0")
                    .unwrap();
            let signature = wallet.sign(b"payload").unwrap();
            assert!(wallet.verify(b"payload", &signature));
            assert!(!wallet.verify(b"tampered", &signature));
        }
    }

    #[test]
    fn test_weierstrass_public_key_encodings() {
        let wallet =
            WeierstrassWallet::from_mnemonic_path(Curve::Secp256k1, MNEMONIC, "", "m/44'/60'/0'/0/0")
                .unwrap();
        let compressed = wallet.public_key_compressed();
        let uncompressed = wallet.public_key_uncompressed();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(compressed[1..], uncompressed[1..33]);
    }

    #[test]
    fn test_recoverable_round_trip() {
        let wallet =
            WeierstrassWallet::from_mnemonic_path(Curve::Secp256k1, MNEMONIC, "", "m/44'/60'/0'/0/0")
                .unwrap();
        let signature = wallet.sign_recoverable(b"payload").unwrap();
        assert!(signature[64] <= 1);
        let recovered = curves::secp256k1::recover_public_key(b"payload", &signature).unwrap();
        assert_eq!(&recovered, wallet.public_key_compressed());
    }

    #[test]
    fn test_recoverable_requires_secp256k1() {
        let wallet =
            WeierstrassWallet::from_mnemonic_path(Curve::NistP256, MNEMONIC, "", "m/44'/60'/0'/0/0")
                .unwrap();
        assert!(wallet.sign_recoverable(b"payload").is_err());
        let mut out = [0u8; 65];
        assert!(!wallet.try_sign_recoverable(b"payload", &mut out));
    }

    #[test]
    fn test_weierstrass_rejects_ed25519() {
        let err = WeierstrassWallet::from_private_key(Curve::Ed25519, [1u8; 32]).unwrap_err();
        assert!(matches!(err, HdError::InvalidCurveInput(_)));
    }

    #[test]
    fn test_weierstrass_rejects_zero_key() {
        assert!(WeierstrassWallet::from_private_key(Curve::Secp256k1, [0u8; 32]).is_err());
    }

    #[test]
    fn test_try_sign_recoverable_buffer_checks() {
        let wallet =
            WeierstrassWallet::from_mnemonic_path(Curve::Secp256k1, MNEMONIC, "", "m/44'/60'/0'/0/0")
                .unwrap();
        let mut wrong = [0u8; 64];
        assert!(!wallet.try_sign_recoverable(b"data", &mut wrong));
        let mut out = [0u8; 65];
        assert!(wallet.try_sign_recoverable(b"data", &mut out));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let wallet =
            WeierstrassWallet::from_mnemonic_path(Curve::Secp256k1, MNEMONIC, "", "m/44'/60'/0'/0/0")
                .unwrap();
        let rendered = format!("{:?}", wallet);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(&hex::encode(wallet.private_key())));
    }
}
