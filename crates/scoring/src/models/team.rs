use serde::{Deserialize, Serialize};

/// Team roster as embedded in a juror's round listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTeam {
    pub id: i64,
    /// Public team code, e.g. `TM-04`. Oral marks are keyed by this value.
    pub team_id: String,
    #[serde(default)]
    pub institution_name: String,
    #[serde(default)]
    pub team_representative_name: String,
    #[serde(default)]
    pub speaker_1_name: String,
    #[serde(default)]
    pub speaker_2_name: String,
    #[serde(default)]
    pub researcher_name: String,
}

/// Condensed team view used by the admin round listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: i64,
    pub team_id: String,
    #[serde(default)]
    pub team_representative_name: String,
    #[serde(default)]
    pub institution_name: String,
    #[serde(default)]
    pub current_round: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuryRef {
    pub id: i64,
    pub name: String,
}

/// A team that may be scheduled into a round of the given name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleTeam {
    pub id: i64,
    pub team_id: String,
    #[serde(default)]
    pub team_representative_name: String,
    #[serde(default)]
    pub institution_name: String,
    #[serde(default)]
    pub current_round: Option<String>,
    #[serde(default)]
    pub jury: Option<JuryRef>,
}
