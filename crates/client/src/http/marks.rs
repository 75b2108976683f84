use scoring::dto::marks::OralMarksPayload;
use scoring::{MarksKey, OralMarksRecord};
use serde::Deserialize;
use tracing::{debug, info};

use super::{ApiClient, decode};
use crate::{ClientError, MarksStore, Result};

const MARKS_PATH: &str = "/api/oral-marks/";

/// The lookup endpoint answers with a list filtered by key, or a single object.
#[derive(Deserialize)]
#[serde(untagged)]
enum LookupResponse {
    Many(Vec<OralMarksRecord>),
    One(OralMarksRecord),
}

#[async_trait::async_trait]
impl MarksStore for ApiClient {
    async fn find_marks(&self, key: &MarksKey) -> Result<Option<OralMarksRecord>> {
        let url = self.url(MARKS_PATH);
        let round_id = key.round_id.to_string();
        let jury_id = key.jury_id.to_string();
        let query = [
            ("team_id", key.team_id.as_str()),
            ("round_id", round_id.as_str()),
            ("jury_id", jury_id.as_str()),
        ];

        let response = match self.execute(|client| client.get(&url).query(&query)).await {
            Ok(response) => response,
            Err(ClientError::NotFound(_)) => {
                debug!(%key, "no oral marks recorded");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let record = match decode::<LookupResponse>(response).await? {
            LookupResponse::Many(records) => records.into_iter().find(|r| r.key() == *key),
            LookupResponse::One(record) => Some(record).filter(|r| r.key() == *key),
        };

        debug!(%key, found = record.is_some(), "oral marks lookup");
        Ok(record)
    }

    async fn upsert_marks(
        &self,
        payload: &OralMarksPayload,
        existing_id: Option<i64>,
    ) -> Result<OralMarksRecord> {
        let response = match existing_id {
            Some(id) => {
                let url = self.url(&format!("{MARKS_PATH}{id}/"));
                self.execute(|client| client.put(&url).json(payload)).await?
            }
            None => {
                let url = self.url(MARKS_PATH);
                self.execute(|client| client.post(&url).json(payload)).await?
            }
        };

        let record: OralMarksRecord = decode(response).await?;
        info!(
            record_id = record.id,
            team_id = %record.team_id,
            round_id = record.round_id,
            updated = existing_id.is_some(),
            "oral marks saved"
        );
        Ok(record)
    }
}
