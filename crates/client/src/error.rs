use scoring::{GateState, OralMarksRecord, ScoringError, TeamSide};
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited by server")]
    RateLimited,

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Session carries no juror identity")]
    MissingJuryIdentity,

    #[error("Marks entry is not open for this round ({0:?})")]
    EntryClosed(GateState),

    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Transport failures, rate limiting and 5xx responses may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::RequestError(e) => e.is_timeout() || e.is_connect(),
            ClientError::Server { status, .. } => *status >= 500,
            ClientError::RateLimited => true,
            _ => false,
        }
    }
}

/// Outcome of a two-team submission that did not fully succeed.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Marks for {failed} were not saved: {source}")]
    Partial {
        failed: TeamSide,
        #[source]
        source: ClientError,
        saved: Box<OralMarksRecord>,
    },

    #[error("Marks for both teams were not saved (team1: {team1}; team2: {team2})")]
    Both {
        team1: ClientError,
        team2: ClientError,
    },
}

impl SubmissionError {
    /// Teams whose marks still need to be resubmitted.
    pub fn failed_sides(&self) -> Vec<TeamSide> {
        match self {
            SubmissionError::Partial { failed, .. } => vec![*failed],
            SubmissionError::Both { .. } => TeamSide::BOTH.to_vec(),
        }
    }
}
