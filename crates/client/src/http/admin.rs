use scoring::dto::round::{CreateRoundRequest, EligibleTeamsQuery, UpdateRoundRequest};
use scoring::models::{AdminRound, EligibleTeam};
use tracing::info;

use super::{ApiClient, decode};
use crate::{Result, RoundAdmin};

const ROUNDS_PATH: &str = "/api/admin/rounds/";

#[async_trait::async_trait]
impl RoundAdmin for ApiClient {
    async fn list_rounds(&self) -> Result<Vec<AdminRound>> {
        self.get_json(ROUNDS_PATH).await
    }

    async fn create_round(&self, request: &CreateRoundRequest) -> Result<AdminRound> {
        request.validate_all()?;

        let url = self.url(ROUNDS_PATH);
        let response = self.execute(|client| client.post(&url).json(request)).await?;
        let round: AdminRound = decode(response).await?;

        info!(round_id = round.id, round_name = %round.round_name, "round created");
        Ok(round)
    }

    async fn update_round(
        &self,
        round_id: i64,
        request: &UpdateRoundRequest,
    ) -> Result<AdminRound> {
        let url = self.url(&format!("{ROUNDS_PATH}{round_id}/"));
        let current: AdminRound = self.get_json(&format!("{ROUNDS_PATH}{round_id}/")).await?;
        request.validate_against(&current)?;

        let response = self.execute(|client| client.patch(&url).json(request)).await?;
        let round: AdminRound = decode(response).await?;

        info!(round_id, status = %round.status, "round updated");
        Ok(round)
    }

    async fn delete_round(&self, round_id: i64) -> Result<()> {
        let url = self.url(&format!("{ROUNDS_PATH}{round_id}/"));
        self.execute(|client| client.delete(&url)).await?;

        info!(round_id, "round deleted");
        Ok(())
    }

    async fn eligible_teams(&self, query: &EligibleTeamsQuery) -> Result<Vec<EligibleTeam>> {
        let url = self.url(&format!("{ROUNDS_PATH}eligible_teams/"));
        let response = self.execute(|client| client.get(&url).query(query)).await?;
        decode(response).await
    }
}
