use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::team::RoundTeam;

/// Lifecycle status of a round.
///
/// The backend owns the vocabulary; values this crate does not recognize are
/// kept verbatim in `Other`. They are displayed like `Upcoming` but gated like
/// a finalized round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoundStatus {
    Upcoming,
    Ongoing,
    Completed,
    Evaluating,
    Other(String),
}

impl RoundStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RoundStatus::Upcoming => "upcoming",
            RoundStatus::Ongoing => "ongoing",
            RoundStatus::Completed => "completed",
            RoundStatus::Evaluating => "evaluating",
            RoundStatus::Other(raw) => raw,
        }
    }

    /// Status used for display decisions: unrecognized values read as upcoming.
    pub fn display_status(&self) -> RoundStatus {
        match self {
            RoundStatus::Other(_) => RoundStatus::Upcoming,
            known => known.clone(),
        }
    }

    /// Neither upcoming nor ongoing, including statuses this crate does not
    /// recognize.
    pub fn is_finalized(&self) -> bool {
        !matches!(self, RoundStatus::Upcoming | RoundStatus::Ongoing)
    }

    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for RoundStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "upcoming" => RoundStatus::Upcoming,
            "ongoing" => RoundStatus::Ongoing,
            "completed" => RoundStatus::Completed,
            "evaluating" => RoundStatus::Evaluating,
            _ => RoundStatus::Other(raw),
        }
    }
}

impl From<RoundStatus> for String {
    fn from(status: RoundStatus) -> Self {
        match status {
            RoundStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    Online,
    Offline,
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundType::Online => f.write_str("online"),
            RoundType::Offline => f.write_str("offline"),
        }
    }
}

/// Which of the two competing teams of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Team1, TeamSide::Team2];
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::Team1 => f.write_str("team1"),
            TeamSide::Team2 => f.write_str("team2"),
        }
    }
}

/// A scheduled match between two teams, as seen by an assigned juror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: i64,
    pub round_name: String,
    pub team1: Option<RoundTeam>,
    pub team2: Option<RoundTeam>,
    /// Numeric id of the winning team, when decided.
    #[serde(default)]
    pub winner: Option<i64>,
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
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Round {
    pub fn team(&self, side: TeamSide) -> Option<&RoundTeam> {
        match side {
            TeamSide::Team1 => self.team1.as_ref(),
            TeamSide::Team2 => self.team2.as_ref(),
        }
    }

    /// Team code of the winner, resolved from the numeric team id.
    pub fn winner_code(&self) -> Option<&str> {
        let winner = self.winner?;
        TeamSide::BOTH
            .into_iter()
            .filter_map(|side| self.team(side))
            .find(|team| team.id == winner)
            .map(|team| team.team_id.as_str())
    }
}
