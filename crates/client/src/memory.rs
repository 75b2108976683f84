//! In-process backend holding rounds and oral marks in memory.
//!
//! Mirrors the REST backend's rules: one record per (team, round, juror), a
//! duplicate create is a conflict, and updates to a record on a finalized
//! round are refused.

use std::collections::HashMap;

use scoring::dto::marks::OralMarksPayload;
use scoring::{MarksKey, OralMarksRecord, Round, RoundStatus};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{ClientError, MarksStore, Result, RoundProvider};

#[derive(Default)]
struct State {
    rounds: Vec<Round>,
    marks: HashMap<MarksKey, OralMarksRecord>,
    next_id: i64,
    lookup_faults: HashMap<String, u32>,
    upsert_faults: HashMap<String, u32>,
}

impl State {
    fn take_fault(faults: &mut HashMap<String, u32>, team_id: &str) -> bool {
        match faults.get_mut(team_id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn round_status(&self, round_id: i64) -> Option<&RoundStatus> {
        self.rounds
            .iter()
            .find(|r| r.id == round_id)
            .map(|r| &r.status)
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounds(rounds: Vec<Round>) -> Self {
        Self {
            state: RwLock::new(State {
                rounds,
                ..State::default()
            }),
        }
    }

    /// Changes a round's status, as an administrator would.
    pub async fn set_round_status(&self, round_id: i64, status: RoundStatus) -> Result<()> {
        let mut state = self.state.write().await;
        let round = state
            .rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or_else(|| ClientError::NotFound(format!("round {round_id}")))?;
        round.status = status;
        Ok(())
    }

    /// Makes the next `times` lookups for `team_id` fail with a server error.
    pub async fn fail_lookups(&self, team_id: &str, times: u32) {
        let mut state = self.state.write().await;
        state.lookup_faults.insert(team_id.to_string(), times);
    }

    /// Makes the next `times` writes for `team_id` fail with a server error.
    pub async fn fail_upserts(&self, team_id: &str, times: u32) {
        let mut state = self.state.write().await;
        state.upsert_faults.insert(team_id.to_string(), times);
    }

    pub async fn record_count(&self) -> usize {
        self.state.read().await.marks.len()
    }
}

fn unavailable() -> ClientError {
    ClientError::Server {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait::async_trait]
impl RoundProvider for InMemoryBackend {
    async fn jury_rounds(&self) -> Result<Vec<Round>> {
        Ok(self.state.read().await.rounds.clone())
    }
}

#[async_trait::async_trait]
impl MarksStore for InMemoryBackend {
    async fn find_marks(&self, key: &MarksKey) -> Result<Option<OralMarksRecord>> {
        let mut state = self.state.write().await;
        if State::take_fault(&mut state.lookup_faults, &key.team_id) {
            return Err(unavailable());
        }
        Ok(state.marks.get(key).cloned())
    }

    async fn upsert_marks(
        &self,
        payload: &OralMarksPayload,
        existing_id: Option<i64>,
    ) -> Result<OralMarksRecord> {
        let mut state = self.state.write().await;
        if State::take_fault(&mut state.upsert_faults, &payload.team_id) {
            return Err(unavailable());
        }

        let key = payload.key();
        let existing = state.marks.get(&key).map(|r| r.id);

        let id = match (existing_id, existing) {
            (None, Some(_)) => {
                return Err(ClientError::Conflict(format!("marks already exist for {key}")));
            }
            (Some(requested), Some(stored)) if requested != stored => {
                return Err(ClientError::NotFound(format!("oral marks {requested}")));
            }
            (Some(requested), None) => {
                return Err(ClientError::NotFound(format!("oral marks {requested}")));
            }
            (Some(stored), Some(_)) => {
                let finalized = state
                    .round_status(key.round_id)
                    .is_some_and(RoundStatus::is_finalized);
                if finalized {
                    return Err(ClientError::Forbidden(format!(
                        "marks for {key} are locked"
                    )));
                }
                stored
            }
            (None, None) => {
                state.next_id += 1;
                state.next_id
            }
        };

        let record = OralMarksRecord {
            id,
            team_id: payload.team_id.clone(),
            round_id: payload.round_id,
            jury_id: payload.jury_id,
            scores: payload.scores.clone(),
            total: Some(payload.scores.total()),
            overall_comments: Some(payload.overall_comments.clone()),
        };

        debug!(%key, record_id = id, "stored oral marks");
        state.marks.insert(key, record.clone());
        Ok(record)
    }
}
