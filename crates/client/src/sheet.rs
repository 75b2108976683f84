//! Scoring dialog state for one round: both teams' sheets side by side.

use std::future::Future;

use rust_decimal::Decimal;
use scoring::services::scoring::{compute_total, initialize_scores, set_score};
use scoring::{
    Criterion, GateState, MarksPresence, OralMarksRecord, Round, RoundTeam, ScoreEntry,
    ScoringError, TeamSide,
};
use tracing::debug;

use crate::hydration::RoundMarksState;
use crate::submission::{SheetSubmission, submit_round, submit_round_until};
use crate::{ClientError, MarksStore, Result, RoundSubmission, Session};

#[derive(Debug, Clone)]
pub struct TeamSheet {
    pub team: RoundTeam,
    pub entry: ScoreEntry,
    pub existing: Option<OralMarksRecord>,
}

#[derive(Debug, Clone)]
pub struct ScoringSheet {
    round: Round,
    jury_id: i64,
    gate: GateState,
    team1: TeamSheet,
    team2: TeamSheet,
}

impl ScoringSheet {
    /// Opens the sheet if the round's gate allows marks entry, seeding each
    /// team from its existing record.
    pub fn open(round: Round, session: &Session, marks: &RoundMarksState) -> Result<Self> {
        let jury_id = session.jury_id()?;

        let gate = marks.gate(&round);
        if !gate.can_enter_marks() {
            return Err(ClientError::EntryClosed(gate));
        }

        let team_sheet = |side: TeamSide| -> Result<TeamSheet> {
            let team = round.team(side).cloned().ok_or(ScoringError::MissingTeam {
                round_id: round.id,
                side,
            })?;
            let existing = marks.existing(side).cloned();
            let entry = existing
                .as_ref()
                .map(ScoreEntry::from_record)
                .unwrap_or_else(initialize_scores);
            Ok(TeamSheet {
                team,
                entry,
                existing,
            })
        };
        let team1 = team_sheet(TeamSide::Team1)?;
        let team2 = team_sheet(TeamSide::Team2)?;

        debug!(round_id = round.id, jury_id, ?gate, "scoring sheet opened");

        Ok(Self {
            round,
            jury_id,
            gate,
            team1,
            team2,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn rubric(&self) -> &'static [Criterion] {
        &Criterion::ALL
    }

    pub fn team(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut TeamSheet {
        match side {
            TeamSide::Team1 => &mut self.team1,
            TeamSide::Team2 => &mut self.team2,
        }
    }

    pub fn entry(&self, side: TeamSide) -> &ScoreEntry {
        &self.team(side).entry
    }

    /// A team whose marks were saved on a finalized round can no longer be
    /// edited; the rest of the sheet stays open.
    pub fn is_locked(&self, side: TeamSide) -> bool {
        self.round.status.is_finalized() && self.team(side).existing.is_some()
    }

    /// Edits to a locked team are ignored.
    pub fn set_score(&mut self, side: TeamSide, field: &str, raw: &str) {
        if self.is_locked(side) {
            debug!(%side, field, "team marks are locked");
            return;
        }
        let sheet = self.team_mut(side);
        sheet.entry = set_score(&sheet.entry, field, raw);
    }

    pub fn total(&self, side: TeamSide) -> Decimal {
        compute_total(self.entry(side))
    }

    pub fn max_total(&self) -> u32 {
        Criterion::total_max_points()
    }

    /// Clears both sheets, locked teams excepted. Existing record ids are
    /// kept so the next submit still updates.
    pub fn reset(&mut self) {
        for side in TeamSide::BOTH {
            if !self.is_locked(side) {
                self.team_mut(side).entry = initialize_scores();
            }
        }
    }

    /// Submitting now finalizes the marks of every team it saves.
    pub fn is_final_submission(&self) -> bool {
        matches!(
            self.gate,
            GateState::Editable {
                final_submission: true,
                ..
            }
        )
    }

    pub fn submit_label(&self) -> &'static str {
        if self.team1.existing.is_some() || self.team2.existing.is_some() {
            "Update Scores"
        } else {
            "Submit Scores"
        }
    }

    fn submissions(&self) -> Result<(SheetSubmission<'_>, SheetSubmission<'_>)> {
        if !self.gate.can_enter_marks() {
            return Err(ClientError::EntryClosed(self.gate));
        }
        Ok((
            SheetSubmission::new(&self.team1.entry, self.team1.existing.as_ref()),
            SheetSubmission::new(&self.team2.entry, self.team2.existing.as_ref()),
        ))
    }

    /// Records the saved side(s) so a retry updates instead of creating. The
    /// round locks only once every team has a record.
    fn apply(&mut self, outcome: &RoundSubmission) {
        for side in TeamSide::BOTH {
            if let Some(record) = outcome.record(side) {
                self.team_mut(side).existing = Some(record.clone());
            }
        }

        let presence = MarksPresence::from_flags(
            self.team1.existing.is_some(),
            self.team2.existing.is_some(),
        );
        self.gate = GateState::evaluate(&self.round.status, presence);
    }

    pub async fn submit<S>(&mut self, store: &S) -> Result<RoundSubmission>
    where
        S: MarksStore + ?Sized,
    {
        let (team1, team2) = self.submissions()?;
        let outcome = submit_round(store, &self.round, self.jury_id, team1, team2).await?;
        self.apply(&outcome);
        Ok(outcome)
    }

    /// Submission tied to the dialog's lifetime; on cancel the sheet is left
    /// exactly as it was.
    pub async fn submit_until<S, C>(&mut self, store: &S, cancel: C) -> Result<RoundSubmission>
    where
        S: MarksStore + ?Sized,
        C: Future<Output = ()>,
    {
        let (team1, team2) = self.submissions()?;
        let outcome =
            submit_round_until(store, &self.round, self.jury_id, team1, team2, cancel).await?;
        self.apply(&outcome);
        Ok(outcome)
    }
}
