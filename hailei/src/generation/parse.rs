//! Parsers for text returned by the generation service.
//!
//! Anything that does not follow the requested format is reported as
//! `Unparseable`; well-formed but short answers are `Incomplete`.

use crate::errors::GenerationUnavailable;
use crate::model::{CourseModule, Kdka, LearningObjectives, PedagogicalFrameworks, Prrr};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static OBJECTIVES: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)TLO:\s*(.*?)\s*ELOs?:\s*(.*)").ok());

static JSON_OBJECT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());

static JSON_ARRAY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").ok());

fn outermost<'a>(pattern: &LazyLock<Option<Regex>>, text: &'a str, what: &str) -> Result<&'a str, GenerationUnavailable> {
    pattern
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str())
        .ok_or_else(|| GenerationUnavailable::unparseable(format!("no {what} found in response")))
}

/// Splits a `TLO: ... ELOs: ...` answer.
pub fn parse_objectives(text: &str) -> Result<LearningObjectives, GenerationUnavailable> {
    let captures = OBJECTIVES
        .as_ref()
        .and_then(|re| re.captures(text))
        .ok_or_else(|| GenerationUnavailable::unparseable("missing TLO:/ELOs: delimiters"))?;

    let tlo = captures.get(1).map_or("", |m| m.as_str()).trim().to_string();
    let elo = captures.get(2).map_or("", |m| m.as_str()).trim().to_string();
    let objectives = LearningObjectives { tlo, elo };
    if objectives.is_complete() {
        Ok(objectives)
    } else {
        Err(GenerationUnavailable::unparseable("empty TLO or ELO section"))
    }
}

#[derive(Deserialize)]
struct RawFrameworks {
    kdka: Kdka,
    prrr: Prrr,
}

/// Extracts the outermost JSON object carrying `kdka` and `prrr`.
pub fn parse_frameworks(text: &str) -> Result<PedagogicalFrameworks, GenerationUnavailable> {
    let json = outermost(&JSON_OBJECT, text, "JSON object")?;
    let raw: RawFrameworks = serde_json::from_str(json)
        .map_err(|e| GenerationUnavailable::unparseable(format!("invalid frameworks JSON: {e}")))?;
    let frameworks = PedagogicalFrameworks {
        kdka: raw.kdka,
        prrr: raw.prrr,
    };
    if frameworks.is_complete() {
        Ok(frameworks)
    } else {
        Err(GenerationUnavailable::unparseable("blank framework entry"))
    }
}

#[derive(Deserialize)]
struct RawModule {
    title: String,
    #[serde(default)]
    objectives: String,
    #[serde(default)]
    activities: String,
    #[serde(default)]
    assessment: String,
}

/// Extracts the outermost JSON array of modules and keeps the first `count`.
pub fn parse_modules(text: &str, count: usize) -> Result<Vec<CourseModule>, GenerationUnavailable> {
    let json = outermost(&JSON_ARRAY, text, "JSON array")?;
    let raw: Vec<RawModule> = serde_json::from_str(json)
        .map_err(|e| GenerationUnavailable::unparseable(format!("invalid modules JSON: {e}")))?;

    let modules: Vec<CourseModule> = raw
        .into_iter()
        .filter(|m| !m.title.trim().is_empty())
        .take(count)
        .zip(1u32..)
        .map(|(m, number)| {
            let mut module = CourseModule::from_title(number, m.title.trim());
            if !m.objectives.trim().is_empty() {
                module.objectives = m.objectives;
            }
            if !m.activities.trim().is_empty() {
                module.activities = m.activities;
            }
            if !m.assessment.trim().is_empty() {
                module.assessment = m.assessment;
            }
            module
        })
        .collect();

    if modules.len() < count {
        return Err(GenerationUnavailable::incomplete(count, modules.len()));
    }
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerationFailureKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_objectives() {
        let text = "TLO: Students will design intelligent agents.\nELOs:\n• Explain search\n• Apply ML";
        let objectives = parse_objectives(text).unwrap();
        assert_eq!(objectives.tlo, "Students will design intelligent agents.");
        assert_eq!(objectives.elo, "• Explain search\n• Apply ML");
    }

    #[test]
    fn test_parse_objectives_without_delimiters() {
        let err = parse_objectives("Here are some objectives").unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Unparseable);

        let err = parse_objectives("TLO: something ELOs:   ").unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Unparseable);
    }

    #[test]
    fn test_parse_frameworks_inside_prose() {
        let text = r#"Sure! {"kdka": {"knowledge": "k", "delivery": "d", "context": "c", "assessment": "a"},
            "prrr": {"personal": "p", "relatable": "r", "relative": "v", "realworld": "w"}} Enjoy."#;
        let frameworks = parse_frameworks(text).unwrap();
        assert_eq!(frameworks.kdka.context, "c");
        assert_eq!(frameworks.prrr.realworld, "w");
    }

    #[test]
    fn test_parse_frameworks_missing_key() {
        let text = r#"{"kdka": {"knowledge": "k"}, "prrr": {}}"#;
        let err = parse_frameworks(text).unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Unparseable);
    }

    #[test]
    fn test_parse_modules_truncates() {
        let text = r#"[{"title": "One", "objectives": "o1"}, {"title": "Two"}, {"title": "Three"}]"#;
        let modules = parse_modules(text, 2).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].objectives, "o1");
        assert_eq!(modules[1].module_number, 2);
        assert!(modules[1].activities.contains("two"));
    }

    #[test]
    fn test_parse_modules_too_few() {
        let err = parse_modules(r#"[{"title": "Only"}]"#, 3).unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Incomplete);
    }

    #[test]
    fn test_parse_modules_not_json() {
        let err = parse_modules("1. Intro\n2. Basics", 2).unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Unparseable);
    }
}
