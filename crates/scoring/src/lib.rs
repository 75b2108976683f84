pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Result, ScoringError};
pub use models::{
    Criterion, CriterionScores, MarksKey, OralMarksRecord, PreparedScores, Round, RoundStatus,
    RoundTeam, RoundType, ScoreEntry, TeamSide,
};
pub use services::gating::{GateState, MarksPresence};
