use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Field name of the free-text comment that travels alongside the criteria.
pub const OVERALL_COMMENTS: &str = "overall_comments";

/// One line of the fixed oral-round scoring rubric.
///
/// The rubric is process-wide configuration: seven criteria whose maxima sum
/// to 100. Declaration order is the order the rubric is presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    KnowledgeOfLaw,
    ApplicationOfLawToFacts,
    IngenuityAndAbilityToAnswerQuestions,
    Persuasiveness,
    TimeManagementAndOrganization,
    StylePoiseCourtesyAndDemeanor,
    LanguageAndPresentation,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::KnowledgeOfLaw,
        Criterion::ApplicationOfLawToFacts,
        Criterion::IngenuityAndAbilityToAnswerQuestions,
        Criterion::Persuasiveness,
        Criterion::TimeManagementAndOrganization,
        Criterion::StylePoiseCourtesyAndDemeanor,
        Criterion::LanguageAndPresentation,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Criterion::KnowledgeOfLaw => "knowledge_of_law",
            Criterion::ApplicationOfLawToFacts => "application_of_law_to_facts",
            Criterion::IngenuityAndAbilityToAnswerQuestions => {
                "ingenuity_and_ability_to_answer_questions"
            }
            Criterion::Persuasiveness => "persuasiveness",
            Criterion::TimeManagementAndOrganization => "time_management_and_organization",
            Criterion::StylePoiseCourtesyAndDemeanor => "style_poise_courtesy_and_demeanor",
            Criterion::LanguageAndPresentation => "language_and_presentation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criterion::KnowledgeOfLaw => "Knowledge of Law",
            Criterion::ApplicationOfLawToFacts => "Application of Law to Facts",
            Criterion::IngenuityAndAbilityToAnswerQuestions => {
                "Ingenuity and Ability to answer Questions"
            }
            Criterion::Persuasiveness => "Persuasiveness",
            Criterion::TimeManagementAndOrganization => "Time Management and Organization",
            Criterion::StylePoiseCourtesyAndDemeanor => "Style, Poise, Courtesy and Demeanor",
            Criterion::LanguageAndPresentation => "Language and Presentation",
        }
    }

    pub fn max_points(self) -> u32 {
        match self {
            Criterion::KnowledgeOfLaw => 25,
            Criterion::ApplicationOfLawToFacts => 20,
            Criterion::IngenuityAndAbilityToAnswerQuestions => 15,
            Criterion::Persuasiveness
            | Criterion::TimeManagementAndOrganization
            | Criterion::StylePoiseCourtesyAndDemeanor
            | Criterion::LanguageAndPresentation => 10,
        }
    }

    /// Upper bound as a decimal, for clamping.
    pub fn max_score(self) -> Decimal {
        Decimal::from(self.max_points())
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Sum of every criterion's maximum.
    pub fn total_max_points() -> u32 {
        Self::ALL.iter().map(|c| c.max_points()).sum()
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
