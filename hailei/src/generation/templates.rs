//! Canned content for the deterministic generator.
//!
//! A course is matched against the bundles in table order by searching its
//! lowercased title for each bundle's keywords as plain substrings. The
//! first match wins and the generic bundle catches everything else.
//! Objectives use their own, shorter key list in which AI precedes data
//! science.
//!
//! Template strings may contain `{title}`, `{title_lower}` and `{domain}`.

use crate::model::CourseInput;

/// Number of module titles every bundle provides.
pub const MODULE_TITLE_COUNT: usize = 8;

/// One keyword-selected set of templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBundle {
    /// Bundle name, recorded in logs.
    pub name: &'static str,
    keywords: &'static [&'static str],
    tlo: &'static str,
    elo: &'static str,
    kdka: [&'static str; 4],
    prrr: [&'static str; 4],
    module_titles: [&'static str; MODULE_TITLE_COUNT],
}

const GENERIC_TLO: &str = "Students will analyze core concepts in {title_lower}, evaluate practical \
     applications, and create innovative solutions for real-world challenges.";
const GENERIC_ELO: &str = "• Master fundamental principles\n• Apply theoretical frameworks\n\
     • Analyze complex problems\n• Develop creative solutions\n• Communicate professionally";

static BUNDLES: [TemplateBundle; 4] = [
    TemplateBundle {
        name: "data_science",
        keywords: &["data science"],
        tlo: "Students will analyze datasets, evaluate statistical models, and create \
              data-driven solutions for real-world problems.",
        elo: "• Identify and clean data sources\n• Apply statistical analysis techniques\n\
              • Create compelling visualizations\n• Build predictive models\n\
              • Communicate findings effectively",
        kdka: [
            "Statistical concepts, programming, ML principles, ethics",
            "Hands-on labs, case studies, projects",
            "Real datasets, industry applications",
            "Portfolio, projects, peer review",
        ],
        prrr: [
            "Career goals in tech/analytics",
            "Social media data, sports stats",
            "Builds toward complete projects",
            "Industry partnerships, internships",
        ],
        module_titles: [
            "Data Science Foundations",
            "Data Collection & Cleaning",
            "Exploratory Analysis",
            "Statistical Modeling",
            "Machine Learning Basics",
            "Data Visualization",
            "Ethics & Communication",
            "Capstone Project",
        ],
    },
    TemplateBundle {
        name: "artificial_intelligence",
        keywords: &["artificial intelligence", "ai", "machine learning"],
        tlo: "Students will analyze AI concepts, evaluate machine learning applications, and \
              create intelligent solutions for real-world problems.",
        elo: "• Identify types of machine learning algorithms\n• Explain neural network fundamentals\n\
              • Evaluate AI applications across industries\n• Analyze ethical implications of AI systems\n\
              • Communicate AI concepts to diverse audiences",
        kdka: [
            "AI fundamentals, machine learning types, neural networks, ethics",
            "Interactive demos, case studies, hands-on AI tools",
            "Real AI applications in healthcare, business, technology",
            "AI tool projects, case analysis, ethical discussions",
        ],
        prrr: [
            "Career opportunities in AI and tech industry",
            "Everyday AI (Siri, Netflix, GPS), social media algorithms",
            "Progressive understanding from basics to applications",
            "Industry case studies, AI tool usage, career pathways",
        ],
        module_titles: [
            "AI Fundamentals & History",
            "Machine Learning Types & Applications",
            "Neural Networks & Deep Learning",
            "AI in Healthcare & Medicine",
            "AI in Business & Finance",
            "Natural Language Processing",
            "AI Ethics & Bias",
            "Future of AI & Career Pathways",
        ],
    },
    TemplateBundle {
        name: "business",
        keywords: &["business"],
        tlo: GENERIC_TLO,
        elo: GENERIC_ELO,
        kdka: [
            "Strategy, finance, leadership, operations",
            "Case studies, simulations, guest speakers",
            "Current business environment",
            "Business plans, case analysis",
        ],
        prrr: [
            "Entrepreneurial aspirations",
            "Startups, local businesses",
            "Progressive skill building",
            "Internships, competitions",
        ],
        module_titles: [
            "Business Fundamentals",
            "Market Analysis",
            "Financial Planning",
            "Operations Management",
            "Leadership Skills",
            "Digital Strategy",
            "Ethics & Responsibility",
            "Business Plan Development",
        ],
    },
    TemplateBundle {
        name: "generic",
        keywords: &[],
        tlo: GENERIC_TLO,
        elo: GENERIC_ELO,
        kdka: [
            "Core {domain} principles and applications",
            "Interactive lectures, workshops, projects",
            "Current {domain} trends and applications",
            "Projects, portfolios, presentations",
        ],
        prrr: [
            "Personal interests in {domain}",
            "Current events and popular examples",
            "Systematic skill progression",
            "Professional {domain} applications",
        ],
        module_titles: [
            "{domain} Foundations",
            "Core {title} Concepts",
            "Practical Applications",
            "Analysis & Critical Thinking",
            "Advanced Topics",
            "Real-World Cases",
            "Professional Practice",
            "Synthesis & Future Directions",
        ],
    },
];

/// Bundles whose objectives are keyed separately, in priority order.
/// Courses matching none of them get the generic objectives.
const OBJECTIVE_KEYS: [(&str, &[&str]); 2] = [
    ("artificial_intelligence", &["artificial intelligence", "ai"]),
    ("data_science", &["data science"]),
];

fn generic_bundle() -> &'static TemplateBundle {
    &BUNDLES[BUNDLES.len() - 1]
}

impl TemplateBundle {
    /// Selects the bundle for a course title.
    #[must_use]
    pub fn select(title: &str) -> &'static Self {
        let title_lower = title.to_lowercase();
        BUNDLES
            .iter()
            .find(|bundle| bundle.keywords.iter().any(|k| title_lower.contains(k)))
            .unwrap_or_else(generic_bundle)
    }

    /// Selects the bundle whose objectives apply to a course title.
    #[must_use]
    pub fn select_for_objectives(title: &str) -> &'static Self {
        let title_lower = title.to_lowercase();
        OBJECTIVE_KEYS
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| title_lower.contains(k)))
            .and_then(|(name, _)| BUNDLES.iter().find(|bundle| bundle.name == *name))
            .unwrap_or_else(generic_bundle)
    }

    /// Renders the terminal and enabling objectives.
    #[must_use]
    pub fn objectives(&self, course: &CourseInput) -> (String, String) {
        (render(self.tlo, course), render(self.elo, course))
    }

    /// Renders the four KDKA entries in order.
    #[must_use]
    pub fn kdka(&self, course: &CourseInput) -> [String; 4] {
        self.kdka.map(|template| render(template, course))
    }

    /// Renders the four PRRR entries in order.
    #[must_use]
    pub fn prrr(&self, course: &CourseInput) -> [String; 4] {
        self.prrr.map(|template| render(template, course))
    }

    /// Renders the first `count` module titles.
    #[must_use]
    pub fn module_titles(&self, course: &CourseInput, count: usize) -> Vec<String> {
        self.module_titles
            .iter()
            .take(count)
            .map(|template| render(template, course))
            .collect()
    }
}

fn render(template: &str, course: &CourseInput) -> String {
    let title = course.title.trim();
    template
        .replace("{title_lower}", &title.to_lowercase())
        .replace("{title}", title)
        .replace("{domain}", course.domain_or_title())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str) -> CourseInput {
        CourseInput::new(title, "desc").with_domain("Chemistry")
    }

    #[test]
    fn test_selection_by_keyword() {
        assert_eq!(TemplateBundle::select("Intro to Data Science").name, "data_science");
        assert_eq!(
            TemplateBundle::select("Introduction to Artificial Intelligence").name,
            "artificial_intelligence"
        );
        assert_eq!(TemplateBundle::select("Practical ML: Machine Learning").name, "artificial_intelligence");
        assert_eq!(TemplateBundle::select("AI for Everyone").name, "artificial_intelligence");
        assert_eq!(TemplateBundle::select("Business Communication").name, "business");
        assert_eq!(TemplateBundle::select("Organic Chemistry").name, "generic");
    }

    #[test]
    fn test_ai_matches_as_substring() {
        assert_eq!(TemplateBundle::select("Aircraft Maintenance").name, "artificial_intelligence");
    }

    #[test]
    fn test_data_science_wins_over_ai() {
        assert_eq!(TemplateBundle::select("AI and Data Science").name, "data_science");
    }

    #[test]
    fn test_objectives_check_ai_first() {
        assert_eq!(
            TemplateBundle::select_for_objectives("AI and Data Science").name,
            "artificial_intelligence"
        );
        assert_eq!(TemplateBundle::select_for_objectives("Intro to Data Science").name, "data_science");
        assert_eq!(TemplateBundle::select_for_objectives("Machine Learning 101").name, "generic");
        assert_eq!(TemplateBundle::select_for_objectives("Business Strategy").name, "generic");
    }

    #[test]
    fn test_generic_placeholders() {
        let course = course("Organic Chemistry");
        let bundle = TemplateBundle::select(&course.title);
        let (tlo, _) = bundle.objectives(&course);
        assert!(tlo.contains("core concepts in organic chemistry"));

        let titles = bundle.module_titles(&course, 2);
        assert_eq!(titles, vec!["Chemistry Foundations", "Core Organic Chemistry Concepts"]);
        assert_eq!(bundle.kdka(&course)[0], "Core Chemistry principles and applications");
    }

    #[test]
    fn test_every_bundle_has_full_title_list() {
        let course = course("x");
        for bundle in &BUNDLES {
            assert_eq!(bundle.module_titles(&course, 100).len(), MODULE_TITLE_COUNT);
        }
    }
}
