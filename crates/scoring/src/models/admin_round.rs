use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::oral_marks::CriterionScores;
use super::round::{RoundStatus, RoundType, TeamSide};
use super::team::{JuryRef, TeamSummary};

/// Marks of one team in a round, as reported to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMarks {
    pub team_id: String,
    #[serde(flatten)]
    pub scores: CriterionScores,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub overall_comments: Option<String>,
}

impl TeamMarks {
    pub fn total(&self) -> Decimal {
        self.total.unwrap_or_else(|| self.scores.total())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMarks {
    #[serde(default)]
    pub team1: Option<TeamMarks>,
    #[serde(default)]
    pub team2: Option<TeamMarks>,
}

impl RoundMarks {
    pub fn get(&self, side: TeamSide) -> Option<&TeamMarks> {
        match side {
            TeamSide::Team1 => self.team1.as_ref(),
            TeamSide::Team2 => self.team2.as_ref(),
        }
    }
}

/// Round record from the administrator listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRound {
    pub id: i64,
    pub round_name: String,
    pub team1: Option<i64>,
    pub team2: Option<i64>,
    #[serde(default)]
    pub team1_details: Option<TeamSummary>,
    #[serde(default)]
    pub team2_details: Option<TeamSummary>,
    #[serde(default)]
    pub winner: Option<i64>,
    #[serde(default)]
    pub winner_details: Option<TeamSummary>,
    pub date: NaiveDate,
    pub time: String,
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub meet_url: Option<String>,
    pub round_type: RoundType,
    pub status: RoundStatus,
    #[serde(default)]
    pub judge: Option<JuryRef>,
    #[serde(default)]
    pub marks: Option<RoundMarks>,
}

impl AdminRound {
    pub fn team_id(&self, side: TeamSide) -> Option<i64> {
        match side {
            TeamSide::Team1 => self.team1,
            TeamSide::Team2 => self.team2,
        }
    }
}
