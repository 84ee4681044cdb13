//! Records produced by the Author stage.

use super::{CourseModule, PrrrAlignment};
use serde::{Deserialize, Serialize};

/// Number of activities, assessments and readings authored per module.
pub(crate) const ITEMS_PER_MODULE: usize = 3;

/// Authored material for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedContent {
    /// Lecture notes summary.
    pub lecture_notes: String,
    /// Learning activities.
    pub activities: Vec<String>,
    /// Assessments.
    pub assessments: Vec<String>,
    /// Readings.
    pub readings: Vec<String>,
}

/// A plan module expanded with authored material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedModule {
    /// 1-based position in the course.
    pub module_number: u32,
    /// Module title.
    pub title: String,
    /// Module objectives, carried from the plan.
    pub objectives: String,
    /// Authored material.
    pub detailed_content: DetailedContent,
    /// PRRR alignment of the module.
    pub prrr_alignment: PrrrAlignment,
}

impl DetailedModule {
    /// Authors a module by phrasing fixed templates around its title.
    #[must_use]
    pub fn author(module: &CourseModule) -> Self {
        let title = &module.title;
        Self {
            module_number: module.module_number,
            title: title.clone(),
            objectives: module.objectives.clone(),
            detailed_content: DetailedContent {
                lecture_notes: format!(
                    "Comprehensive lecture notes covering {title} with theoretical foundations \
                     and practical examples aligned with PRRR framework."
                ),
                activities: vec![
                    format!("Interactive workshop on {title}"),
                    format!("Case study analysis related to {title}"),
                    format!("Hands-on project applying {title} concepts"),
                ],
                assessments: vec![
                    format!("Formative quiz on {title} fundamentals"),
                    format!("Practical project demonstrating {title} skills"),
                    format!("Peer discussion forum on {title} applications"),
                ],
                readings: vec![
                    format!("Required textbook chapter on {title}"),
                    format!("Supplementary articles on {title} trends"),
                    format!("Case studies in {title} applications"),
                ],
            },
            prrr_alignment: PrrrAlignment {
                personal: format!("Connect {title} to student career goals"),
                relatable: format!("Use everyday examples of {title}"),
                relative: format!("Show how {title} supports course objectives"),
                realworld: format!("Industry applications of {title}"),
            },
        }
    }
}

/// Export readiness of the authored package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScormPackage {
    /// Export status.
    pub status: String,
    /// Number of packaged modules.
    pub modules_count: usize,
    /// Estimated package size.
    pub estimated_size: String,
}

impl ScormPackage {
    /// Describes a package of `modules_count` modules ready for export.
    #[must_use]
    pub fn ready(modules_count: usize) -> Self {
        Self {
            status: "ready_for_export".to_string(),
            modules_count,
            estimated_size: "45MB".to_string(),
        }
    }
}

/// Rollup counters over all authored modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    /// Activities across all modules.
    pub total_activities: usize,
    /// Assessments across all modules.
    pub total_assessments: usize,
    /// Readings across all modules.
    pub total_readings: usize,
    /// Frameworks the content follows.
    pub framework_compliance: String,
}

impl ContentSummary {
    /// Sums the authored items of `modules`.
    #[must_use]
    pub fn of(modules: &[DetailedModule]) -> Self {
        Self {
            total_activities: modules.iter().map(|m| m.detailed_content.activities.len()).sum(),
            total_assessments: modules.iter().map(|m| m.detailed_content.assessments.len()).sum(),
            total_readings: modules.iter().map(|m| m.detailed_content.readings.len()).sum(),
            framework_compliance: "KDKA + PRRR + TILT".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_produces_three_items_each() {
        let module = DetailedModule::author(&CourseModule::from_title(1, "Market Analysis"));
        let content = &module.detailed_content;
        assert_eq!(content.activities.len(), ITEMS_PER_MODULE);
        assert_eq!(content.assessments.len(), ITEMS_PER_MODULE);
        assert_eq!(content.readings.len(), ITEMS_PER_MODULE);
        assert!(content.lecture_notes.contains("Market Analysis"));
        assert_eq!(module.prrr_alignment.realworld, "Industry applications of Market Analysis");
    }

    #[test]
    fn test_summary_counts() {
        let modules: Vec<_> = (1..=4)
            .map(|n| DetailedModule::author(&CourseModule::from_title(n, format!("M{n}"))))
            .collect();
        let summary = ContentSummary::of(&modules);
        assert_eq!(summary.total_activities, 12);
        assert_eq!(summary.total_assessments, 12);
        assert_eq!(summary.total_readings, 12);
    }
}
