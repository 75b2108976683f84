use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid round: {0}")]
    InvalidRound(&'static str),

    #[error("Round {round_id} has no {side} assigned")]
    MissingTeam { round_id: i64, side: crate::models::TeamSide },
}

pub type Result<T> = std::result::Result<T, ScoringError>;
