//! Records produced by the Plan stage.

use serde::{Deserialize, Serialize};

/// Terminal and enabling learning objectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjectives {
    /// Terminal learning objective.
    pub tlo: String,
    /// Enabling learning objectives, one bullet per line.
    pub elo: String,
}

impl LearningObjectives {
    /// Returns true if both objectives carry text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.tlo.trim().is_empty() && !self.elo.trim().is_empty()
    }
}

/// Knowledge, Delivery, Context, Assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kdka {
    /// What students will know.
    pub knowledge: String,
    /// How content is delivered.
    pub delivery: String,
    /// Where learning connects to practice.
    pub context: String,
    /// How learning is measured.
    pub assessment: String,
}

/// Personal, Relatable, Relative, Real-world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prrr {
    /// Connection to the student's own goals.
    pub personal: String,
    /// Familiar examples.
    pub relatable: String,
    /// How the part supports the whole.
    pub relative: String,
    /// Authentic applications.
    pub realworld: String,
}

/// Both framework mappings for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedagogicalFrameworks {
    /// KDKA mapping.
    pub kdka: Kdka,
    /// PRRR mapping.
    pub prrr: Prrr,
}

impl PedagogicalFrameworks {
    /// Returns true if none of the eight entries is blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            &self.kdka.knowledge,
            &self.kdka.delivery,
            &self.kdka.context,
            &self.kdka.assessment,
            &self.prrr.personal,
            &self.prrr.relatable,
            &self.prrr.relative,
            &self.prrr.realworld,
        ]
        .iter()
        .all(|entry| !entry.trim().is_empty())
    }
}

/// One module of the course plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    /// 1-based position in the course.
    pub module_number: u32,
    /// Module title.
    pub title: String,
    /// Module objectives.
    pub objectives: String,
    /// Planned activities.
    pub activities: String,
    /// Planned assessment.
    pub assessment: String,
}

impl CourseModule {
    /// Builds a module whose descriptions are phrased around its title.
    #[must_use]
    pub fn from_title(module_number: u32, title: impl Into<String>) -> Self {
        let title = title.into();
        let topic = title.to_lowercase();
        Self {
            module_number,
            objectives: format!(
                "Students will master key concepts in {topic} and apply them practically"
            ),
            activities: format!(
                "Interactive sessions, hands-on exercises, case studies related to {topic}"
            ),
            assessment: format!("Formative quiz, practical project, peer discussion on {topic}"),
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_from_title_phrasing() {
        let module = CourseModule::from_title(3, "Neural Networks & Deep Learning");
        assert_eq!(module.module_number, 3);
        assert_eq!(module.title, "Neural Networks & Deep Learning");
        assert!(module.objectives.contains("neural networks & deep learning"));
        assert!(module.assessment.starts_with("Formative quiz"));
    }

    #[test]
    fn test_frameworks_completeness() {
        let mut frameworks = PedagogicalFrameworks {
            kdka: Kdka {
                knowledge: "k".into(),
                delivery: "d".into(),
                context: "c".into(),
                assessment: "a".into(),
            },
            prrr: Prrr {
                personal: "p".into(),
                relatable: "r".into(),
                relative: "r".into(),
                realworld: "w".into(),
            },
        };
        assert!(frameworks.is_complete());

        frameworks.prrr.realworld = " ".into();
        assert!(!frameworks.is_complete());
    }

    #[test]
    fn test_objectives_completeness() {
        let objectives = LearningObjectives {
            tlo: "Students will analyze".into(),
            elo: String::new(),
        };
        assert!(!objectives.is_complete());
    }
}
