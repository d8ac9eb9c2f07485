//! Model fingerprint registry and tamper signal.
//!
//! Mocks a model registry that tracks agent model versions. The signal
//! contract is a boolean: the live fingerprint either matches the last
//! known one or it does not. This is not an attestation protocol.

use crate::core::Fingerprint;
use std::collections::HashMap;
use std::sync::RwLock;

/// External tamper-signal collaborator.
///
/// A mismatch between the live fingerprint and the caller-supplied
/// previous fingerprint indicates potential compromise, as opposed to
/// legitimate behavioral drift.
pub trait TamperSignal: Send + Sync {
    /// Whether the agent's live model fingerprint differs from `last_known`.
    fn hash_tampered(&self, agent_id: &str, last_known: &Fingerprint) -> bool;
}

/// Default model version tag for newly seen agents.
pub const DEFAULT_MODEL_VERSION: &str = "model-v1.3";

/// Registry of current model versions per agent.
pub struct ModelRegistry {
    /// Current version tag per agent
    versions: RwLock<HashMap<String, String>>,
}

impl ModelRegistry {
    /// Create a registry where every agent runs the default model version.
    pub fn new() -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// The agent's current model version tag.
    pub fn version(&self, agent_id: &str) -> String {
        let versions = self.versions.read().unwrap();
        versions
            .get(agent_id)
            .cloned()
            .unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string())
    }

    /// Replace the agent's model version, e.g. to simulate a model swap.
    pub fn set_version(&self, agent_id: &str, version: &str) {
        let mut versions = self.versions.write().unwrap();
        versions.insert(agent_id.to_string(), version.to_string());
    }

    /// Fingerprint of the agent's live model version.
    pub fn current_fingerprint(&self, agent_id: &str) -> Fingerprint {
        Fingerprint::of_model(agent_id, &self.version(agent_id))
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TamperSignal for ModelRegistry {
    fn hash_tampered(&self, agent_id: &str, last_known: &Fingerprint) -> bool {
        self.current_fingerprint(agent_id) != *last_known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_agent_not_tampered() {
        let registry = ModelRegistry::new();
        let pinned = registry.current_fingerprint("finance_agent");
        assert!(!registry.hash_tampered("finance_agent", &pinned));
    }

    #[test]
    fn test_version_swap_detected() {
        let registry = ModelRegistry::new();
        let pinned = registry.current_fingerprint("finance_agent");

        registry.set_version("finance_agent", "model-v9.9-rogue");
        assert!(registry.hash_tampered("finance_agent", &pinned));
    }

    #[test]
    fn test_stale_fingerprint_detected() {
        let registry = ModelRegistry::new();
        let stale = Fingerprint::digest(b"some-old-recording");
        assert!(registry.hash_tampered("finance_agent", &stale));
    }

    #[test]
    fn test_agents_fingerprint_independently() {
        let registry = ModelRegistry::new();
        let finance = registry.current_fingerprint("finance_agent");
        let audit = registry.current_fingerprint("audit_agent");
        assert_ne!(finance, audit);
    }
}
