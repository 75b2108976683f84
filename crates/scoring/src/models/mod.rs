mod admin_round;
mod criterion;
mod oral_marks;
mod round;
mod score_entry;
mod team;

pub use admin_round::{AdminRound, RoundMarks, TeamMarks};
pub use criterion::{Criterion, OVERALL_COMMENTS};
pub use oral_marks::{CriterionScores, MarksKey, OralMarksRecord, PreparedScores};
pub use round::{Round, RoundStatus, RoundType, TeamSide};
pub use score_entry::ScoreEntry;
pub use team::{EligibleTeam, JuryRef, RoundTeam, TeamSummary};
