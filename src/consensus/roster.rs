//! Agent roster.
//!
//! The panel of voting agents, loaded once per engine instantiation from
//! a static configuration.

use crate::core::Result;
use serde::{Deserialize, Serialize};

/// Role of a voting agent. Selects which fixed rule the agent votes by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Approves anything under the finance ceiling
    Finance,
    /// Reviews unknown merchants
    Compliance,
    /// Reviews high-value transactions
    Audit,
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentRole::Finance => write!(f, "finance"),
            AgentRole::Compliance => write!(f, "compliance"),
            AgentRole::Audit => write!(f, "audit"),
        }
    }
}

/// An identity participating in consensus. Immutable once configured.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Role selecting the voting rule
    pub role: AgentRole,
    /// Informational trust score
    pub trust_score: f64,
}

impl Agent {
    /// Create a new agent.
    pub fn new(id: &str, name: &str, role: AgentRole, trust_score: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
            trust_score,
        }
    }
}

/// Simulated operational status of one agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Agent id
    pub agent_id: String,
    /// Display name
    pub name: String,
    /// Whether the agent reported healthy
    pub healthy: bool,
    /// Status label
    pub status: String,
    /// Informational trust score
    pub trust_score: f64,
}

#[derive(Deserialize)]
struct RosterFile {
    agents: Vec<Agent>,
}

/// The full agent panel.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    agents: Vec<Agent>,
}

impl Roster {
    /// Create a roster from a list of agents.
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Load a roster from JSON of the form `{"agents": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RosterFile = serde_json::from_str(json)?;
        Ok(Self { agents: file.agents })
    }

    /// The standard three-agent panel.
    pub fn standard() -> Self {
        Self::new(vec![
            Agent::new("finance_agent", "Finance Agent", AgentRole::Finance, 0.95),
            Agent::new(
                "compliance_agent",
                "Compliance Agent",
                AgentRole::Compliance,
                0.92,
            ),
            Agent::new("audit_agent", "Audit Agent", AgentRole::Audit, 0.90),
        ])
    }

    /// All agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Look up an agent by id.
    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the roster has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Simulated fleet health report.
    pub fn status_report(&self) -> Vec<AgentStatus> {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        self.agents
            .iter()
            .map(|agent| {
                let healthy = rng.gen::<f64>() < 0.95;
                AgentStatus {
                    agent_id: agent.id.clone(),
                    name: agent.name.clone(),
                    healthy,
                    status: if healthy { "OPERATIONAL" } else { "DEGRADED" }.to_string(),
                    trust_score: agent.trust_score,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roster() {
        let roster = Roster::standard();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get("finance_agent").unwrap().role, AgentRole::Finance);
        assert!(roster.get("unknown_agent").is_none());
    }

    #[test]
    fn test_roster_from_json() {
        let json = r#"{
            "agents": [
                {"id": "finance_agent", "name": "Finance Agent", "role": "finance", "trust_score": 0.95},
                {"id": "audit_agent", "name": "Audit Agent", "role": "audit", "trust_score": 0.9}
            ]
        }"#;

        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("audit_agent").unwrap().role, AgentRole::Audit);
    }

    #[test]
    fn test_roster_from_malformed_json() {
        assert!(Roster::from_json("{not json").is_err());
    }

    #[test]
    fn test_status_report_covers_all_agents() {
        let roster = Roster::standard();
        let report = roster.status_report();
        assert_eq!(report.len(), 3);
        for status in report {
            assert!(status.status == "OPERATIONAL" || status.status == "DEGRADED");
        }
    }

    #[test]
    fn test_role_display() {
        assert_eq!(AgentRole::Compliance.to_string(), "compliance");
    }
}
