use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{RoundMarks, TeamSide};

/// Totals of both teams in a round and which team leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarksSummary {
    pub team1_total: Option<Decimal>,
    pub team2_total: Option<Decimal>,
    /// `None` while either side is unmarked or when totals are tied.
    pub leader: Option<TeamSide>,
}

pub fn summarize_marks(marks: &RoundMarks) -> MarksSummary {
    let team1_total = marks.team1.as_ref().map(|m| m.total());
    let team2_total = marks.team2.as_ref().map(|m| m.total());

    let leader = match (team1_total, team2_total) {
        (Some(a), Some(b)) if a > b => Some(TeamSide::Team1),
        (Some(a), Some(b)) if b > a => Some(TeamSide::Team2),
        _ => None,
    };

    MarksSummary {
        team1_total,
        team2_total,
        leader,
    }
}
