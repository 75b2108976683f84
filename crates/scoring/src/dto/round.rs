use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, ScoringError};
use crate::models::{AdminRound, RoundStatus, RoundType};

/// Request payload for scheduling a new round
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoundRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Round name must be between 1 and 255 characters"
    ))]
    pub round_name: String,

    pub team1: i64,

    pub team2: i64,

    pub date: NaiveDate,

    #[validate(length(min = 1, max = 16))]
    pub time: String,

    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_in_minutes: u32,

    #[validate(length(max = 255))]
    pub venue: Option<String>,

    #[validate(url)]
    pub meet_url: Option<String>,

    pub round_type: RoundType,

    #[serde(default = "default_status")]
    pub status: RoundStatus,

    pub winner: Option<i64>,
}

/// Partial update of an existing round; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub round_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 16))]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub duration_in_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub venue: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub meet_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_type: Option<RoundType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoundStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<i64>,
}

/// Query of the eligible-teams lookup
#[derive(Debug, Clone, Serialize)]
pub struct EligibleTeamsQuery {
    pub round_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jury_id: Option<i64>,
}

fn default_status() -> RoundStatus {
    RoundStatus::Upcoming
}

fn check_pairing(team1: i64, team2: i64, winner: Option<i64>) -> Result<()> {
    if team1 == team2 {
        return Err(ScoringError::InvalidRound(
            "A round needs two different teams",
        ));
    }

    if let Some(winner) = winner {
        if winner != team1 && winner != team2 {
            return Err(ScoringError::InvalidRound(
                "Winner must be one of the round's teams",
            ));
        }
    }

    Ok(())
}

impl CreateRoundRequest {
    /// Field validation plus the checks that span several fields
    pub fn validate_all(&self) -> Result<()> {
        self.validate()?;
        check_pairing(self.team1, self.team2, self.winner)
    }
}

impl UpdateRoundRequest {
    /// Validates the update against the round it will be applied to
    pub fn validate_against(&self, current: &AdminRound) -> Result<()> {
        self.validate()?;

        let team1 = self.team1.or(current.team1);
        let team2 = self.team2.or(current.team2);
        match (team1, team2) {
            (Some(team1), Some(team2)) => {
                check_pairing(team1, team2, self.winner.or(current.winner))
            }
            _ if self.winner.is_some() => Err(ScoringError::InvalidRound(
                "Winner cannot be set before both teams are assigned",
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateRoundRequest {
        CreateRoundRequest {
            round_name: "Semi Final".to_string(),
            team1: 1,
            team2: 2,
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            time: "14:00".to_string(),
            duration_in_minutes: 60,
            venue: Some("Hall A".to_string()),
            meet_url: None,
            round_type: RoundType::Offline,
            status: RoundStatus::Upcoming,
            winner: None,
        }
    }

    fn admin_round() -> AdminRound {
        serde_json::from_value(serde_json::json!({
            "id": 9,
            "round_name": "Final",
            "team1": 1,
            "team2": 2,
            "date": "2025-04-05",
            "time": "09:00:00",
            "duration_in_minutes": 90,
            "round_type": "offline",
            "status": "ongoing"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate_all().is_ok());
    }

    #[test]
    fn test_same_team_twice_is_rejected() {
        let mut req = create_request();
        req.team2 = 1;
        assert!(matches!(
            req.validate_all(),
            Err(ScoringError::InvalidRound(_))
        ));
    }

    #[test]
    fn test_field_rules() {
        let mut req = create_request();
        req.duration_in_minutes = 0;
        req.meet_url = Some("not a url".to_string());
        let Err(ScoringError::Validation(errors)) = req.validate_all() else {
            panic!("expected validation errors");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("duration_in_minutes"));
        assert!(fields.contains_key("meet_url"));
    }

    #[test]
    fn test_update_winner_checked_against_current_round() {
        let current = admin_round();

        let ok = UpdateRoundRequest {
            status: Some(RoundStatus::Completed),
            winner: Some(2),
            ..Default::default()
        };
        assert!(ok.validate_against(&current).is_ok());

        let stranger = UpdateRoundRequest {
            winner: Some(7),
            ..Default::default()
        };
        assert!(stranger.validate_against(&current).is_err());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let req = UpdateRoundRequest {
            status: Some(RoundStatus::Evaluating),
            ..Default::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "evaluating" }));
    }
}
