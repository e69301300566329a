//! Fingerprint output types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 64-bit DCT fingerprint.
///
/// Bit 63 holds the top-left cell of the 8×8 coefficient block and the
/// remaining bits follow in row-major order. Rendered as 16 uppercase
/// hexadecimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DctHash(u64);

impl DctHash {
    pub const HEX_LEN: usize = 16;

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// Number of differing bits between two hashes
    pub fn distance(self, other: DctHash) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Display for DctHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl FromStr for DctHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected {} hexadecimal digits, got '{s}'", Self::HEX_LEN));
        }
        u64::from_str_radix(s, 16).map(DctHash).map_err(|e| e.to_string())
    }
}

impl From<DctHash> for String {
    fn from(hash: DctHash) -> Self {
        hash.to_string()
    }
}

impl TryFrom<String> for DctHash {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The artifact returned by a fingerprint pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "value")]
pub enum Fingerprint {
    #[serde(rename = "dct")]
    Dct(DctHash),
    /// Gaps between consecutive zero crossings; may be empty
    #[serde(rename = "original")]
    Legacy(Vec<usize>),
}

impl Fingerprint {
    pub fn as_dct(&self) -> Option<DctHash> {
        match self {
            Fingerprint::Dct(hash) => Some(*hash),
            Fingerprint::Legacy(_) => None,
        }
    }

    pub fn as_legacy(&self) -> Option<&[usize]> {
        match self {
            Fingerprint::Dct(_) => None,
            Fingerprint::Legacy(gaps) => Some(gaps),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fingerprint::Dct(hash) => fmt::Display::fmt(hash, f),
            Fingerprint::Legacy(gaps) => {
                let rendered: Vec<String> = gaps.iter().map(usize::to_string).collect();
                f.write_str(&rendered.join(","))
            }
        }
    }
}
