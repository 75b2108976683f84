use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::criterion::Criterion;

/// Natural key of an oral-marks record: one sheet per team, round and juror.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarksKey {
    pub team_id: String,
    pub round_id: i64,
    pub jury_id: i64,
}

impl MarksKey {
    pub fn new(team_id: impl Into<String>, round_id: i64, jury_id: i64) -> Self {
        Self {
            team_id: team_id.into(),
            round_id,
            jury_id,
        }
    }
}

impl std::fmt::Display for MarksKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "team {} / round {} / jury {}",
            self.team_id, self.round_id, self.jury_id
        )
    }
}

/// Numeric value of every rubric criterion, as persisted by the backend.
///
/// Serialized as JSON numbers; accepts numbers or decimal strings on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub knowledge_of_law: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub application_of_law_to_facts: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub ingenuity_and_ability_to_answer_questions: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub persuasiveness: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub time_management_and_organization: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub style_poise_courtesy_and_demeanor: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub language_and_presentation: Decimal,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> Decimal {
        match criterion {
            Criterion::KnowledgeOfLaw => self.knowledge_of_law,
            Criterion::ApplicationOfLawToFacts => self.application_of_law_to_facts,
            Criterion::IngenuityAndAbilityToAnswerQuestions => {
                self.ingenuity_and_ability_to_answer_questions
            }
            Criterion::Persuasiveness => self.persuasiveness,
            Criterion::TimeManagementAndOrganization => self.time_management_and_organization,
            Criterion::StylePoiseCourtesyAndDemeanor => self.style_poise_courtesy_and_demeanor,
            Criterion::LanguageAndPresentation => self.language_and_presentation,
        }
    }

    pub fn set(&mut self, criterion: Criterion, value: Decimal) {
        let slot = match criterion {
            Criterion::KnowledgeOfLaw => &mut self.knowledge_of_law,
            Criterion::ApplicationOfLawToFacts => &mut self.application_of_law_to_facts,
            Criterion::IngenuityAndAbilityToAnswerQuestions => {
                &mut self.ingenuity_and_ability_to_answer_questions
            }
            Criterion::Persuasiveness => &mut self.persuasiveness,
            Criterion::TimeManagementAndOrganization => &mut self.time_management_and_organization,
            Criterion::StylePoiseCourtesyAndDemeanor => {
                &mut self.style_poise_courtesy_and_demeanor
            }
            Criterion::LanguageAndPresentation => &mut self.language_and_presentation,
        };
        *slot = value;
    }

    pub fn total(&self) -> Decimal {
        Criterion::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// First criterion whose value lies outside `[0, max]`, if any.
    pub fn first_out_of_range(&self) -> Option<Criterion> {
        Criterion::ALL.into_iter().find(|c| {
            let value = self.get(*c);
            value < Decimal::ZERO || value > c.max_score()
        })
    }
}

/// A score sheet normalized for persistence: every criterion numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedScores {
    pub scores: CriterionScores,
    pub overall_comments: String,
}

impl PreparedScores {
    pub fn total(&self) -> Decimal {
        self.scores.total()
    }
}

/// Persisted oral marks of one team in one round, as judged by one juror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OralMarksRecord {
    pub id: i64,
    pub team_id: String,
    pub round_id: i64,
    pub jury_id: i64,
    #[serde(flatten)]
    pub scores: CriterionScores,
    /// Server-computed sum; absent on some backends.
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub overall_comments: Option<String>,
}

impl OralMarksRecord {
    pub fn key(&self) -> MarksKey {
        MarksKey::new(self.team_id.clone(), self.round_id, self.jury_id)
    }

    /// Stored total, falling back to the sum of the criteria.
    pub fn total(&self) -> Decimal {
        self.total.unwrap_or_else(|| self.scores.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_record_accepts_numbers_and_strings() {
        let json = r#"{
            "id": 7,
            "team_id": "TM-04",
            "round_id": 3,
            "jury_id": 12,
            "knowledge_of_law": 20,
            "application_of_law_to_facts": "15.50",
            "ingenuity_and_ability_to_answer_questions": 10,
            "persuasiveness": 8,
            "time_management_and_organization": 9,
            "style_poise_courtesy_and_demeanor": 7,
            "language_and_presentation": 6,
            "overall_comments": null
        }"#;

        let record: OralMarksRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.key(), MarksKey::new("TM-04", 3, 12));
        assert_eq!(
            record.scores.application_of_law_to_facts,
            Decimal::from_str("15.5").unwrap()
        );
        assert_eq!(record.total(), Decimal::from_str("75.5").unwrap());
        assert_eq!(record.overall_comments, None);
    }

    #[test]
    fn test_scores_serialize_as_numbers() {
        let mut scores = CriterionScores::default();
        scores.set(Criterion::Persuasiveness, Decimal::from_str("7.5").unwrap());

        let value = serde_json::to_value(&scores).unwrap();
        assert_eq!(value["persuasiveness"], serde_json::json!(7.5));
        assert_eq!(value["knowledge_of_law"], serde_json::json!(0.0));
    }

    #[test]
    fn test_first_out_of_range() {
        let mut scores = CriterionScores::default();
        assert_eq!(scores.first_out_of_range(), None);

        scores.set(Criterion::ApplicationOfLawToFacts, Decimal::from(21));
        assert_eq!(
            scores.first_out_of_range(),
            Some(Criterion::ApplicationOfLawToFacts)
        );
    }

    #[test]
    fn test_out_of_range_uses_each_criterion_ceiling() {
        let mut scores = CriterionScores::default();
        for criterion in Criterion::ALL {
            scores.set(criterion, criterion.max_score());
        }
        assert_eq!(scores.first_out_of_range(), None);

        scores.set(Criterion::Persuasiveness, Decimal::from(11));
        assert_eq!(scores.first_out_of_range(), Some(Criterion::Persuasiveness));

        scores.set(Criterion::Persuasiveness, Decimal::from(10));
        scores.set(Criterion::LanguageAndPresentation, Decimal::NEGATIVE_ONE);
        assert_eq!(
            scores.first_out_of_range(),
            Some(Criterion::LanguageAndPresentation)
        );
    }
}
