//! Prompts sent to the text-generation service.

use crate::model::CourseInput;

/// System instructions shared by every Plan request.
pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert instructional designer specializing in \
    KDKA (Knowledge, Delivery, Context, Assessment) and PRRR (Personal, Relatable, Relative, \
    Real-world) pedagogical frameworks. Create pedagogically sound, engaging educational content.";

fn course_header(course: &CourseInput) -> String {
    format!(
        "**Course:** {}\n**Description:** {}\n**Level:** {}\n**Domain:** {}",
        course.title.trim(),
        course.description.trim(),
        course.level,
        course.domain_or_title(),
    )
}

fn goal_list(course: &CourseInput) -> String {
    course.goals().join(", ")
}

pub(super) fn objectives_prompt(course: &CourseInput) -> String {
    format!(
        "Create learning objectives for this course using Bloom's taxonomy:\n\n\
         {header}\n**Goals:** {goals}\n\n\
         Please generate:\n\
         1. ONE Terminal Learning Objective (TLO) - overarching outcome\n\
         2. 5-6 Enabling Learning Objectives (ELOs) - specific skills\n\n\
         Requirements:\n\
         - Use Bloom's verbs appropriate for {level} level\n\
         - Make objectives measurable and specific\n\
         - Align with the course goals provided\n\
         - Focus on what students will DO/DEMONSTRATE\n\n\
         Format as:\n\
         TLO: [single comprehensive objective]\n\
         ELOs:\n\
         • [objective 1]\n\
         • [objective 2]\n\
         • [etc.]\n",
        header = course_header(course),
        goals = goal_list(course),
        level = course.level,
    )
}

pub(super) fn frameworks_prompt(course: &CourseInput) -> String {
    format!(
        "Create KDKA and PRRR pedagogical frameworks for this course:\n\n\
         {header}\n\n\
         KDKA Model (Knowledge, Delivery, Context, Assessment):\n\
         - Knowledge: What key knowledge will students acquire?\n\
         - Delivery: How will content be delivered effectively?\n\
         - Context: What real-world contexts will connect learning?\n\
         - Assessment: How will learning be measured?\n\n\
         PRRR Model (Personal, Relatable, Relative, Real-world):\n\
         - Personal: How does content connect to student experiences?\n\
         - Relatable: What examples/analogies make content relatable?\n\
         - Relative: How does each element support course outcomes?\n\
         - Real-world: What authentic applications will students engage with?\n\n\
         Format as JSON:\n\
         {{\"kdka\": {{\"knowledge\": \"...\", \"delivery\": \"...\", \"context\": \"...\", \
         \"assessment\": \"...\"}}, \"prrr\": {{\"personal\": \"...\", \"relatable\": \"...\", \
         \"relative\": \"...\", \"realworld\": \"...\"}}}}\n",
        header = course_header(course),
    )
}

pub(super) fn modules_prompt(course: &CourseInput, count: usize) -> String {
    format!(
        "Create {count} course modules for this course:\n\n\
         {header}\n**Goals:** {goals}\n\n\
         Generate {count} modules with:\n\
         - Progressive learning sequence\n\
         - Clear module titles\n\
         - Specific learning objectives for each module\n\
         - Engaging activities aligned with course level\n\
         - Appropriate assessments\n\n\
         Format as JSON array:\n\
         [{{\"title\": \"Module Title\", \"objectives\": \"What students will learn/do in this module\", \
         \"activities\": \"Learning activities and exercises\", \
         \"assessment\": \"How learning will be assessed\"}}, ...]\n",
        header = course_header(course),
        goals = goal_list(course),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::sample_course;

    #[test]
    fn test_prompts_describe_the_course() {
        let course = sample_course();
        let prompt = objectives_prompt(&course);
        assert!(prompt.contains("**Course:** Introduction to Artificial Intelligence"));
        assert!(prompt.contains("Understand core AI concepts, Evaluate AI applications"));
        assert!(prompt.contains("TLO:"));

        assert!(frameworks_prompt(&course).contains("\"realworld\""));
        assert!(modules_prompt(&course, 2).starts_with("Create 2 course modules"));
    }
}
