//! Loading the existing oral marks of both teams of a round.
//!
//! The two lookups are independent: they run concurrently and each team's
//! state is settled on its own, whatever order the responses arrive in.

use scoring::{GateState, MarksKey, MarksPresence, OralMarksRecord, Round, TeamSide};
use tracing::warn;

use crate::{ClientError, MarksStore, Result, RoundProvider, Session};

#[derive(Debug)]
pub enum TeamMarksState {
    /// Lookup succeeded and no record exists (or the round has no such team).
    Missing,
    Found(OralMarksRecord),
    Failed(ClientError),
}

impl TeamMarksState {
    pub fn record(&self) -> Option<&OralMarksRecord> {
        match self {
            TeamMarksState::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TeamMarksState::Failed(_))
    }
}

#[derive(Debug)]
pub struct RoundMarksState {
    pub team1: TeamMarksState,
    pub team2: TeamMarksState,
}

impl RoundMarksState {
    pub fn get(&self, side: TeamSide) -> &TeamMarksState {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    pub fn existing(&self, side: TeamSide) -> Option<&OralMarksRecord> {
        self.get(side).record()
    }

    /// Any failed lookup makes the whole picture unknown.
    pub fn presence(&self) -> MarksPresence {
        if self.team1.is_failed() || self.team2.is_failed() {
            return MarksPresence::Unknown;
        }
        MarksPresence::from_flags(self.team1.record().is_some(), self.team2.record().is_some())
    }

    pub fn failures(&self) -> Vec<(TeamSide, &ClientError)> {
        TeamSide::BOTH
            .into_iter()
            .filter_map(|side| match self.get(side) {
                TeamMarksState::Failed(e) => Some((side, e)),
                _ => None,
            })
            .collect()
    }

    pub fn gate(&self, round: &Round) -> GateState {
        GateState::evaluate(&round.status, self.presence())
    }
}

pub async fn load_team_marks<S>(
    store: &S,
    round: &Round,
    side: TeamSide,
    jury_id: i64,
) -> TeamMarksState
where
    S: MarksStore + ?Sized,
{
    let Some(team) = round.team(side) else {
        return TeamMarksState::Missing;
    };

    let key = MarksKey::new(team.team_id.clone(), round.id, jury_id);
    match store.find_marks(&key).await {
        Ok(Some(record)) => TeamMarksState::Found(record),
        Ok(None) => TeamMarksState::Missing,
        Err(e) => {
            warn!(%key, error = %e, "failed to load existing oral marks");
            TeamMarksState::Failed(e)
        }
    }
}

pub async fn hydrate_round<S>(store: &S, round: &Round, jury_id: i64) -> RoundMarksState
where
    S: MarksStore + ?Sized,
{
    let (team1, team2) = tokio::join!(
        load_team_marks(store, round, TeamSide::Team1, jury_id),
        load_team_marks(store, round, TeamSide::Team2, jury_id),
    );
    RoundMarksState { team1, team2 }
}

/// Fetches one of the juror's rounds together with its existing marks.
pub async fn load_round<P, S>(
    provider: &P,
    store: &S,
    session: &Session,
    round_id: i64,
) -> Result<(Round, RoundMarksState)>
where
    P: RoundProvider + ?Sized,
    S: MarksStore + ?Sized,
{
    let jury_id = session.jury_id()?;
    let round = provider.jury_round(round_id).await?;
    let marks = hydrate_round(store, &round, jury_id).await;
    Ok((round, marks))
}
