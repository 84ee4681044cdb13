//! Course input and its echo in the Plan output.

use crate::errors::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Number of modules requested when the caller gives none.
pub const DEFAULT_WEEKS: u32 = 8;

/// Minimum number of non-blank goals a course must state.
pub const MIN_GOALS: usize = 2;

fn default_weeks() -> u32 {
    DEFAULT_WEEKS
}

/// Target audience level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseLevel {
    /// No prior knowledge assumed.
    #[serde(alias = "introductory")]
    Introductory,
    /// Some prior knowledge assumed.
    #[default]
    #[serde(alias = "intermediate")]
    Intermediate,
    /// Substantial prior knowledge assumed.
    #[serde(alias = "advanced")]
    Advanced,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Introductory => write!(f, "Introductory"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

/// The caller's description of the course to design.
///
/// Field aliases accept the `course_*` names used by the per-agent HTTP
/// contract, so either spelling deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    /// Course title.
    #[serde(default, alias = "course_title")]
    pub title: String,
    /// Course description.
    #[serde(default, alias = "course_description")]
    pub description: String,
    /// Audience level.
    #[serde(default, alias = "course_level")]
    pub level: CourseLevel,
    /// Subject domain, e.g. "Computer Science".
    #[serde(default, alias = "course_domain")]
    pub domain: String,
    /// Broad course goals, in priority order.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Number of modules requested.
    #[serde(default = "default_weeks")]
    pub weeks: u32,
}

impl CourseInput {
    /// Creates a course input with default level, no goals and 8 weeks.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: CourseLevel::default(),
            domain: String::new(),
            goals: Vec::new(),
            weeks: DEFAULT_WEEKS,
        }
    }

    /// Sets the level.
    #[must_use]
    pub fn with_level(mut self, level: CourseLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the goals.
    #[must_use]
    pub fn with_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.goals = goals.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the requested number of modules.
    #[must_use]
    pub fn with_weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    /// Goals with blank entries dropped and whitespace trimmed.
    #[must_use]
    pub fn goals(&self) -> Vec<&str> {
        self.goals
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// The domain, or the title when no domain was given.
    #[must_use]
    pub fn domain_or_title(&self) -> &str {
        let domain = self.domain.trim();
        if domain.is_empty() {
            self.title.trim()
        } else {
            domain
        }
    }

    /// Number of modules to generate given how many titles are available.
    #[must_use]
    pub fn module_count(&self, available: usize) -> usize {
        usize::try_from(self.weeks).map_or(available, |weeks| weeks.min(available))
    }

    /// Decodes a course from a request mapping.
    ///
    /// A value of the wrong shape (an unknown level, goals that are not a
    /// list, a negative week count, ...) is a validation failure naming the
    /// field, not a processing error.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        serde_json::from_value(Value::Object(map.clone())).map_err(|err| {
            let mut violations = ValidationError::new();
            check_field::<String>(&mut violations, map, &["title", "course_title"]);
            check_field::<String>(&mut violations, map, &["description", "course_description"]);
            check_field::<CourseLevel>(&mut violations, map, &["level", "course_level"]);
            check_field::<String>(&mut violations, map, &["domain", "course_domain"]);
            check_field::<Vec<String>>(&mut violations, map, &["goals"]);
            check_field::<u32>(&mut violations, map, &["weeks"]);
            if violations.is_empty() {
                violations.push("course", format!("invalid course input: {err}"));
            }
            violations
        })
    }

    /// Checks the input contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new();
        if self.title.trim().is_empty() {
            err.push("title", "title must not be empty");
        }
        if self.description.trim().is_empty() {
            err.push("description", "description must not be empty");
        }
        let goals = self.goals().len();
        if goals < MIN_GOALS {
            err.push(
                "goals",
                format!("at least {MIN_GOALS} goals are required, got {goals}"),
            );
        }
        if self.weeks == 0 {
            err.push("weeks", "weeks must be at least 1");
        }
        err.into_result()
    }
}

/// Records a violation under `keys[0]` if any spelling of the field holds a
/// value that does not decode as `T`.
fn check_field<T: DeserializeOwned>(violations: &mut ValidationError, map: &Map<String, Value>, keys: &[&str]) {
    let bad = keys.iter().find_map(|key| {
        let value = map.get(*key)?;
        serde_json::from_value::<T>(value.clone()).err()
    });
    if let (Some(err), Some(field)) = (bad, keys.first()) {
        violations.push(*field, format!("{field}: {err}"));
    }
}

/// Echo of the course input inside the Plan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course title.
    pub title: String,
    /// Course description.
    pub description: String,
    /// Audience level.
    pub level: CourseLevel,
    /// Subject domain.
    #[serde(default)]
    pub domain: String,
    /// Non-blank goals.
    pub goals: Vec<String>,
    /// Requested module count.
    pub weeks: u32,
}

impl From<&CourseInput> for CourseInfo {
    fn from(input: &CourseInput) -> Self {
        Self {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            level: input.level,
            domain: input.domain.trim().to_string(),
            goals: input.goals().into_iter().map(str::to_string).collect(),
            weeks: input.weeks,
        }
    }
}
