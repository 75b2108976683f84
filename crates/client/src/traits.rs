use scoring::dto::marks::OralMarksPayload;
use scoring::dto::round::{CreateRoundRequest, EligibleTeamsQuery, UpdateRoundRequest};
use scoring::models::{AdminRound, EligibleTeam};
use scoring::{MarksKey, OralMarksRecord, Round};

use crate::{ClientError, Result};

/// Source of the rounds assigned to the signed-in juror.
#[async_trait::async_trait]
pub trait RoundProvider: Send + Sync {
    async fn jury_rounds(&self) -> Result<Vec<Round>>;

    async fn jury_round(&self, round_id: i64) -> Result<Round> {
        self.jury_rounds()
            .await?
            .into_iter()
            .find(|r| r.id == round_id)
            .ok_or_else(|| ClientError::NotFound(format!("round {round_id}")))
    }
}

/// Persistence of oral-marks records keyed by (team, round, juror).
#[async_trait::async_trait]
pub trait MarksStore: Send + Sync {
    /// Absence is `Ok(None)`, never an error.
    async fn find_marks(&self, key: &MarksKey) -> Result<Option<OralMarksRecord>>;

    /// Creates the record, or updates `existing_id` when given.
    async fn upsert_marks(
        &self,
        payload: &OralMarksPayload,
        existing_id: Option<i64>,
    ) -> Result<OralMarksRecord>;
}

/// Round administration available to staff accounts.
#[async_trait::async_trait]
pub trait RoundAdmin: Send + Sync {
    async fn list_rounds(&self) -> Result<Vec<AdminRound>>;

    async fn create_round(&self, request: &CreateRoundRequest) -> Result<AdminRound>;

    async fn update_round(&self, round_id: i64, request: &UpdateRoundRequest)
    -> Result<AdminRound>;

    async fn delete_round(&self, round_id: i64) -> Result<()>;

    async fn eligible_teams(&self, query: &EligibleTeamsQuery) -> Result<Vec<EligibleTeam>>;
}
