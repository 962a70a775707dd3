//! Agent card advertised at `GET /a2a/agent-card`.

use serde::{Deserialize, Serialize};

/// Capability flags. The gateway advertises none, so this serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentCapabilities {}

/// A skill offered by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
    pub tags: Vec<String>,
}

impl AgentSkill {
    fn new(id: &str, name: &str, description: &str, examples: &[&str], tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            examples: examples.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Static self-description of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub version: String,
    pub url: String,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
}

impl AgentCard {
    /// The gateway's card: policy enforcement and workflow management
    /// skills, text and JSON modes, served from `url`.
    pub fn gateway(url: impl Into<String>, version: impl Into<String>) -> Self {
        let modes = vec!["text".to_string(), "json".to_string()];
        Self {
            name: "NPL-Integrated-A2A-Server".to_string(),
            description: "A2A server with NPL policy enforcement for agent workflows"
                .to_string(),
            version: version.into(),
            url: url.into(),
            capabilities: AgentCapabilities::default(),
            skills: vec![
                AgentSkill::new(
                    "policy_enforcement",
                    "Policy Enforcement",
                    "Enforce NPL-based policies for agent interactions",
                    &[
                        "Check if agent can perform action",
                        "Validate workflow state",
                    ],
                    &["policy", "authorization", "security"],
                ),
                AgentSkill::new(
                    "workflow_management",
                    "Workflow Management",
                    "Manage multi-agent workflow states and transitions",
                    &["Submit RFP", "Approve workflow step", "Generate contract"],
                    &["workflow", "state-management", "rfp"],
                ),
            ],
            default_input_modes: modes.clone(),
            default_output_modes: modes,
        }
    }
}
