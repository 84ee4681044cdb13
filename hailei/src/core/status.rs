//! Stage identity and status enums.

use crate::errors::HaileiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Course planning: objectives, frameworks, module list.
    Plan,
    /// Course authoring: detailed module content.
    Author,
    /// Knowledge-source enrichment.
    Enrich,
    /// LMS technical specification.
    TechnicalSpec,
    /// Content quality review.
    Review,
    /// Ethical compliance audit.
    EthicsAudit,
}

impl StageId {
    /// All stages in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Plan,
        Self::Author,
        Self::Enrich,
        Self::TechnicalSpec,
        Self::Review,
        Self::EthicsAudit,
    ];

    /// Returns the snake-case stage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Author => "author",
            Self::Enrich => "enrich",
            Self::TechnicalSpec => "technical_spec",
            Self::Review => "review",
            Self::EthicsAudit => "ethics_audit",
        }
    }

    /// Returns the agent name written into stage outputs.
    #[must_use]
    pub const fn agent_name(&self) -> &'static str {
        match self {
            Self::Plan => "IPDAi",
            Self::Author => "CAuthAi",
            Self::Enrich => "SearchAi",
            Self::TechnicalSpec => "TFDAi",
            Self::Review => "EditorAi",
            Self::EthicsAudit => "EthosAi",
        }
    }

    /// Returns the route key used by per-agent endpoints.
    #[must_use]
    pub const fn route_key(&self) -> &'static str {
        match self {
            Self::Plan => "ipdai",
            Self::Author => "cauthai",
            Self::Enrich => "searchai",
            Self::TechnicalSpec => "tfdai",
            Self::Review => "editorai",
            Self::EthicsAudit => "ethosai",
        }
    }

    /// Returns a one-line description of the stage.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Plan => "Instructional Planning & Design",
            Self::Author => "Course Authoring",
            Self::Enrich => "Semantic Search & Enrichment",
            Self::TechnicalSpec => "Technical & Functional Design",
            Self::Review => "Content Review & Enhancement",
            Self::EthicsAudit => "Ethical Oversight",
        }
    }

    /// Returns the stage that feeds this one, if any.
    #[must_use]
    pub const fn predecessor(&self) -> Option<Self> {
        match self {
            Self::Plan => None,
            Self::Author => Some(Self::Plan),
            Self::Enrich => Some(Self::Author),
            Self::TechnicalSpec => Some(Self::Enrich),
            Self::Review => Some(Self::TechnicalSpec),
            Self::EthicsAudit => Some(Self::Review),
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageId {
    type Err = HaileiError;

    /// Accepts the stage name, the route key, or the agent name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| {
                wanted == id.as_str()
                    || wanted == id.route_key()
                    || wanted == id.agent_name().to_ascii_lowercase()
            })
            .ok_or_else(|| HaileiError::UnknownStage(s.to_string()))
    }
}

/// The status a stage reports in its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage completed successfully.
    Completed,
    /// Stage refused or failed to process its input.
    Error,
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::Completed
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl StageStatus {
    /// Returns true if downstream stages may consume the output.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
