// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// hd-core: BIP32 / SLIP-0010 / BIP39 / BIP44 key derivation, zero I/O
//
// Modules:
//   bip39_utils — Mnemonic validation & 64-byte seed expansion
//   bip44       — Derivation-path codec (parse, format, chain presets)
//   slip10      — Master + child derivation over any supported curve
//   curves      — Per-curve primitives (secp256k1, NIST P-256, Ed25519)
//   wallet      — Signing facades with precomputed public keys
//   errors      — Typed failure kinds shared across the crate
//
// The engine is synchronous, allocation-light, and never sources
// randomness: mnemonics and seeds always come from the caller.

pub mod bip39_utils;
pub mod bip44;
pub mod curves;
pub mod errors;
pub mod slip10;
pub mod wallet;

pub use bip44::{DerivationPath, HARDENED_OFFSET};
pub use curves::Curve;
pub use errors::HdError;
pub use slip10::ExtendedKey;
pub use wallet::{EdwardsWallet, WeierstrassWallet};
