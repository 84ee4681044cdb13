//! Markdown syllabus rendering.
//!
//! Works on the Plan output or any later output, since every stage passes
//! the plan fields through.

use crate::core::StageOutput;
use crate::errors::HaileiError;
use crate::model::{CourseInfo, CourseModule, LearningObjectives, PedagogicalFrameworks};
use std::fmt::Write;

/// Renders the course plan carried by `output` as a markdown syllabus.
pub fn render_syllabus(output: &StageOutput) -> Result<String, HaileiError> {
    let info: CourseInfo = output.field("course_info")?;
    let objectives: LearningObjectives = output.field("learning_objectives")?;
    let frameworks: PedagogicalFrameworks = output.field("pedagogical_frameworks")?;
    let modules: Vec<CourseModule> = output.field("course_modules")?;

    let mut doc = String::new();
    write_syllabus(&mut doc, &info, &objectives, &frameworks, &modules)
        .map_err(|e| HaileiError::Serialization(e.to_string()))?;
    Ok(doc)
}

fn write_syllabus(
    doc: &mut String,
    info: &CourseInfo,
    objectives: &LearningObjectives,
    frameworks: &PedagogicalFrameworks,
    modules: &[CourseModule],
) -> std::fmt::Result {
    writeln!(doc, "# {}\n", info.title)?;
    writeln!(doc, "## Course Description\n{}\n", info.description)?;

    writeln!(doc, "## Course Goals")?;
    for goal in &info.goals {
        writeln!(doc, "• {goal}")?;
    }

    writeln!(doc, "\n## Learning Outcomes")?;
    writeln!(doc, "**Terminal Learning Objectives:** {}\n", objectives.tlo)?;
    writeln!(doc, "**Enabling Learning Objectives:**\n{}\n", objectives.elo)?;

    let kdka = &frameworks.kdka;
    let prrr = &frameworks.prrr;
    writeln!(doc, "## Pedagogical Framework Integration")?;
    writeln!(doc, "This course integrates KDKA and PRRR models:\n")?;
    writeln!(doc, "**KDKA Framework:**")?;
    writeln!(doc, "- **Knowledge:** {}", kdka.knowledge)?;
    writeln!(doc, "- **Delivery:** {}", kdka.delivery)?;
    writeln!(doc, "- **Context:** {}", kdka.context)?;
    writeln!(doc, "- **Assessment:** {}\n", kdka.assessment)?;
    writeln!(doc, "**PRRR Framework:**")?;
    writeln!(doc, "- **Personal:** {}", prrr.personal)?;
    writeln!(doc, "- **Relatable:** {}", prrr.relatable)?;
    writeln!(doc, "- **Relative:** {}", prrr.relative)?;
    writeln!(doc, "- **Real-world:** {}\n", prrr.realworld)?;

    writeln!(doc, "## Course Modules")?;
    for module in modules {
        writeln!(doc, "\n### Module {}: {}", module.module_number, module.title)?;
        writeln!(doc, "- **Learning Objectives:** {}", module.objectives)?;
        writeln!(doc, "- **Learning Activities:** {}", module.activities)?;
        writeln!(doc, "- **Assessment:** {}", module.assessment)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StageId;
    use crate::testing::fixtures::{author_output, plan_output};

    #[tokio::test]
    async fn test_render_plan_syllabus() {
        let syllabus = render_syllabus(&plan_output().await).unwrap();

        assert!(syllabus.starts_with("# Introduction to Artificial Intelligence\n"));
        assert!(syllabus.contains("• Understand core AI concepts"));
        assert!(syllabus.contains("**Terminal Learning Objectives:** Students will analyze AI concepts"));
        assert!(syllabus.contains("### Module 1: AI Fundamentals & History"));
        assert!(syllabus.contains("### Module 2: Machine Learning Types & Applications"));
        assert!(!syllabus.contains("### Module 3"));
    }

    #[tokio::test]
    async fn test_render_from_later_output() {
        let syllabus = render_syllabus(&author_output().await).unwrap();
        assert!(syllabus.contains("- **Real-world:** Industry case studies"));
    }

    #[test]
    fn test_missing_plan_fields() {
        let output = StageOutput::completed(StageId::Review, "Stats", "1.0");
        let err = render_syllabus(&output).unwrap_err();
        assert!(err.to_string().contains("course_info"));
    }
}
