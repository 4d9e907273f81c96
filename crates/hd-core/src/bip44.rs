// Rusby HD — Pure Rust hierarchical deterministic key engine
// Copyright (C) 2025 axpnet & Claude Opus (Anthropic)
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip44: Derivation-path codec
//
// Types:
//   DerivationPath — ordered 32-bit indices with text parse/format
// Functions:
//   DerivationPath::parse()          — "m/44'/60'/0'/0/0" → indices
//   DerivationPath::try_parse_into() — non-allocating variant
//   DerivationPath::ethereum/cosmos/solana() — canonical chain paths

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HdError;

/// First hardened index. Indices at or above this value use the parent
/// private key for derivation; below it the parent public key.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A BIP44-style derivation path: an ordered sequence of 32-bit indices.
///
/// The textual form is `m` followed by `/`-separated segments; a trailing
/// `'` (canonical) or `h` marks a hardened segment. `m` alone is the empty
/// path. Raw segment values must fit below [`HARDENED_OFFSET`]; the offset
/// is added back for hardened segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationPath(Vec<u32>);

/// Parse failure, cheap enough for the non-allocating entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathIssue {
    Empty,
    MissingPrefix,
    MissingSeparator,
    EmptySegment(usize),
    InvalidDigit(usize),
    IndexOverflow(usize),
    DestinationTooSmall,
}

impl PathIssue {
    fn into_error(self) -> HdError {
        let msg = match self {
            PathIssue::Empty => "path is empty".to_string(),
            PathIssue::MissingPrefix => "path must start with 'm'".to_string(),
            PathIssue::MissingSeparator => "expected '/' after 'm'".to_string(),
            PathIssue::EmptySegment(pos) => format!("segment {} is empty", pos),
            PathIssue::InvalidDigit(pos) => {
                format!("segment {} contains a non-decimal character", pos)
            }
            PathIssue::IndexOverflow(pos) => {
                format!("index at segment {} does not fit below the hardening offset", pos)
            }
            PathIssue::DestinationTooSmall => "destination holds fewer indices than the path".to_string(),
        };
        HdError::InvalidPath(msg)
    }
}

/// Segment iterator over the text after the `m` prefix. Yields each parsed
/// index without copying any part of the input.
pub(crate) struct Segments<'a> {
    split: Option<std::str::Split<'a, char>>,
    position: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<u32, PathIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.split.as_mut()?.next()?;
        let position = self.position;
        self.position += 1;
        Some(parse_segment(segment, position))
    }
}

/// Validate the `m` prefix and return the segment iterator. `"m"` yields an
/// iterator over zero segments.
pub(crate) fn segments(text: &str) -> Result<Segments<'_>, PathIssue> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(PathIssue::Empty);
    }
    if bytes[0] != b'm' {
        return Err(PathIssue::MissingPrefix);
    }
    if bytes.len() == 1 {
        return Ok(Segments {
            split: None,
            position: 0,
        });
    }
    if bytes[1] != b'/' {
        return Err(PathIssue::MissingSeparator);
    }
    Ok(Segments {
        split: Some(text[2..].split('/')),
        position: 0,
    })
}

fn parse_segment(segment: &str, position: usize) -> Result<u32, PathIssue> {
    let (digits, hardened) = match segment.as_bytes().last() {
        Some(b'\'') | Some(b'h') => (&segment[..segment.len() - 1], true),
        _ => (segment, false),
    };
    if digits.is_empty() {
        return Err(PathIssue::EmptySegment(position));
    }
    let mut value: u32 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            return Err(PathIssue::InvalidDigit(position));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or(PathIssue::IndexOverflow(position))?;
        if value >= HARDENED_OFFSET {
            return Err(PathIssue::IndexOverflow(position));
        }
    }
    Ok(if hardened { value + HARDENED_OFFSET } else { value })
}

fn parse_into(text: &str, out: &mut [u32]) -> Result<usize, PathIssue> {
    let mut written = 0;
    for index in segments(text)? {
        let index = index?;
        if written == out.len() {
            return Err(PathIssue::DestinationTooSmall);
        }
        out[written] = index;
        written += 1;
    }
    Ok(written)
}

impl DerivationPath {
    /// Standard EVM account path: m/44'/60'/0'/0/<account>
    pub fn ethereum(account: u32) -> Self {
        Self(vec![
            44 | HARDENED_OFFSET,
            60 | HARDENED_OFFSET,
            HARDENED_OFFSET,
            0,
            account,
        ])
    }

    /// Standard Cosmos account path: m/44'/118'/0'/0/<account>
    pub fn cosmos(account: u32) -> Self {
        Self(vec![
            44 | HARDENED_OFFSET,
            118 | HARDENED_OFFSET,
            HARDENED_OFFSET,
            0,
            account,
        ])
    }

    /// Solana account path, fully hardened: m/44'/501'/<account>'/0'
    pub fn solana(account: u32) -> Self {
        Self(vec![
            44 | HARDENED_OFFSET,
            501 | HARDENED_OFFSET,
            account | HARDENED_OFFSET,
            HARDENED_OFFSET,
        ])
    }

    /// Parse path text. `"m"` parses to the empty path; `"m/"`, a missing
    /// `m`, empty segments, non-decimal characters, and indices at or above
    /// the hardening offset are all rejected.
    pub fn parse(text: &str) -> Result<Self, HdError> {
        let mut indices = Vec::new();
        for index in segments(text).map_err(PathIssue::into_error)? {
            indices.push(index.map_err(PathIssue::into_error)?);
        }
        Ok(Self(indices))
    }

    /// Non-allocating parse into a caller-provided buffer. On success writes
    /// the index count to `indices_written` and returns true; on any failure
    /// (including a destination shorter than the path) writes 0 and returns
    /// false.
    pub fn try_parse_into(text: &str, out: &mut [u32], indices_written: &mut usize) -> bool {
        match parse_into(text, out) {
            Ok(count) => {
                *indices_written = count;
                true
            }
            Err(_) => {
                *indices_written = 0;
                false
            }
        }
    }

    /// The raw indices, hardening offset included.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &index in &self.0 {
            if index >= HARDENED_OFFSET {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}
