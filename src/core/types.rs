//! Common types used across VIGIL modules.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// A 256-bit model-version fingerprint (SHA3-256).
///
/// Used to detect whether an agent's underlying model changed since the
/// fingerprint was last recorded. Equality is the only operation that
/// carries meaning; the preimage is never recovered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Create a Fingerprint from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Digest arbitrary data into a fingerprint.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        let out = hasher.finalize();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&out);
        Self(arr)
    }

    /// Fingerprint an agent's model version tag.
    pub fn of_model(agent_id: &str, version: &str) -> Self {
        Self::digest(format!("{agent_id}-{version}").as_bytes())
    }

    /// Get the bytes of the fingerprint.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Round to two decimal places.
///
/// Approval rates and thresholds must be rounded identically on both
/// sides of a comparison so a 2-of-3 vote (0.6666…) satisfies a 0.67
/// threshold.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_hex_roundtrip() {
        let fp = Fingerprint::digest(b"finance_agent-model-v1.3");
        let hex_str = fp.to_hex();
        let parsed = Fingerprint::from_hex(&hex_str).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of_model("finance_agent", "model-v1.3");
        let b = Fingerprint::of_model("finance_agent", "model-v1.3");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_version_sensitive() {
        let a = Fingerprint::of_model("finance_agent", "model-v1.3");
        let b = Fingerprint::of_model("finance_agent", "model-v1.4");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_display() {
        let fp = Fingerprint::new([1u8; 32]);
        assert_eq!(format!("{}", fp).len(), 64); // 32 bytes * 2 hex chars
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(0.665), 0.67);
        assert_eq!(round2(0.8), 0.8);
    }
}
