//! Digest primitive used by the searcher

use md5::{Digest as _, Md5};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Length of an MD5 digest in bytes
pub const DIGEST_LEN: usize = 16;

/// Fixed-size digest output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hexadecimal rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Each byte as a decimal integer, space separated and quoted: `"97 98 "`
    pub fn to_integral_string(&self) -> String {
        let mut out = String::with_capacity(2 + DIGEST_LEN * 4);
        out.push('"');
        for byte in self.0 {
            out.push_str(&byte.to_string());
            out.push(' ');
        }
        out.push('"');
        out
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Digest(bytes))
    }
}

/// A hashing primitive: bytes in, 16-byte digest out
pub trait DigestFn: Send + Sync {
    /// Algorithm name used in logs and errors
    fn name(&self) -> &str;

    fn digest(&self, input: &[u8]) -> Result<Digest>;
}

/// MD5 backed by the RustCrypto `md-5` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl DigestFn for Md5Digest {
    fn name(&self) -> &str {
        "md5"
    }

    fn digest(&self, input: &[u8]) -> Result<Digest> {
        Ok(Digest(Md5::digest(input).into()))
    }
}
