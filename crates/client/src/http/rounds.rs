use scoring::Round;
use tracing::info;

use super::ApiClient;
use crate::{Result, RoundProvider};

#[async_trait::async_trait]
impl RoundProvider for ApiClient {
    async fn jury_rounds(&self) -> Result<Vec<Round>> {
        let rounds: Vec<Round> = self.get_json("/api/jury-own-rounds/").await?;
        info!(count = rounds.len(), "fetched juror rounds");
        Ok(rounds)
    }
}
