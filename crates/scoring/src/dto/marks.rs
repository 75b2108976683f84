use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{CriterionScores, MarksKey, PreparedScores};

/// Body of an oral-marks create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OralMarksPayload {
    #[validate(length(min = 1, max = 64, message = "Team id must be between 1 and 64 characters"))]
    pub team_id: String,

    #[validate(range(min = 1))]
    pub round_id: i64,

    #[validate(range(min = 1))]
    pub jury_id: i64,

    #[serde(flatten)]
    #[validate(custom(function = "validate_scores"))]
    pub scores: CriterionScores,

    pub overall_comments: String,
}

impl OralMarksPayload {
    pub fn new(key: &MarksKey, prepared: PreparedScores) -> Self {
        Self {
            team_id: key.team_id.clone(),
            round_id: key.round_id,
            jury_id: key.jury_id,
            scores: prepared.scores,
            overall_comments: prepared.overall_comments,
        }
    }

    pub fn key(&self) -> MarksKey {
        MarksKey::new(self.team_id.clone(), self.round_id, self.jury_id)
    }
}

fn validate_scores(scores: &CriterionScores) -> Result<(), ValidationError> {
    match scores.first_out_of_range() {
        None => Ok(()),
        Some(criterion) => {
            let mut error = ValidationError::new("score_out_of_range");
            error.message = Some(Cow::Owned(format!(
                "{} must be between 0 and {}",
                criterion.label(),
                criterion.max_points()
            )));
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Criterion;
    use rust_decimal::Decimal;

    fn payload() -> OralMarksPayload {
        let mut scores = CriterionScores::default();
        scores.set(Criterion::KnowledgeOfLaw, Decimal::from(20));
        OralMarksPayload::new(
            &MarksKey::new("TM-01", 5, 9),
            PreparedScores {
                scores,
                overall_comments: String::new(),
            },
        )
    }

    #[test]
    fn test_valid_payload_serializes_flat() {
        let payload = payload();
        assert!(payload.validate().is_ok());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["team_id"], "TM-01");
        assert_eq!(value["round_id"], 5);
        assert_eq!(value["knowledge_of_law"], serde_json::json!(20.0));
        assert_eq!(value["overall_comments"], "");
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let mut payload = payload();
        payload.scores.set(Criterion::Persuasiveness, Decimal::from(11));
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("scores"));
    }

    #[test]
    fn test_missing_identifiers_are_rejected() {
        let mut payload = payload();
        payload.team_id.clear();
        payload.jury_id = 0;
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("team_id"));
        assert!(fields.contains_key("jury_id"));
    }
}
