//! Submission of both teams' oral marks for a round.
//!
//! The two writes are separate upserts keyed by (team, round, juror). They run
//! concurrently and each one's outcome is reported on its own. On a finalized
//! round a team that already has a record is locked: its record is reported
//! back as is and nothing is sent for it.

use std::future::Future;

use scoring::dto::marks::OralMarksPayload;
use scoring::services::scoring::prepare_submission;
use scoring::{MarksKey, OralMarksRecord, Round, ScoreEntry, ScoringError, TeamSide};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::{ClientError, MarksStore, Result, SubmissionError};

/// One team's sheet and its existing record, if any.
#[derive(Debug, Clone, Copy)]
pub struct SheetSubmission<'a> {
    pub entry: &'a ScoreEntry,
    pub existing: Option<&'a OralMarksRecord>,
}

impl<'a> SheetSubmission<'a> {
    pub fn new(entry: &'a ScoreEntry, existing: Option<&'a OralMarksRecord>) -> Self {
        Self { entry, existing }
    }

    pub fn existing_id(&self) -> Option<i64> {
        self.existing.map(|r| r.id)
    }
}

/// What a submission does for one team.
#[derive(Debug)]
enum TeamWrite<'a> {
    Upsert {
        payload: OralMarksPayload,
        existing_id: Option<i64>,
    },
    Locked(&'a OralMarksRecord),
}

/// Per-team outcome of a round submission.
#[derive(Debug)]
pub struct RoundSubmission {
    pub team1: std::result::Result<OralMarksRecord, ClientError>,
    pub team2: std::result::Result<OralMarksRecord, ClientError>,
}

impl RoundSubmission {
    pub fn is_complete(&self) -> bool {
        self.team1.is_ok() && self.team2.is_ok()
    }

    pub fn record(&self, side: TeamSide) -> Option<&OralMarksRecord> {
        match side {
            TeamSide::Team1 => self.team1.as_ref().ok(),
            TeamSide::Team2 => self.team2.as_ref().ok(),
        }
    }

    /// Success only when both writes are confirmed.
    pub fn into_result(
        self,
    ) -> std::result::Result<(OralMarksRecord, OralMarksRecord), SubmissionError> {
        match (self.team1, self.team2) {
            (Ok(team1), Ok(team2)) => Ok((team1, team2)),
            (Ok(saved), Err(source)) => Err(SubmissionError::Partial {
                failed: TeamSide::Team2,
                source,
                saved: Box::new(saved),
            }),
            (Err(source), Ok(saved)) => Err(SubmissionError::Partial {
                failed: TeamSide::Team1,
                source,
                saved: Box::new(saved),
            }),
            (Err(team1), Err(team2)) => Err(SubmissionError::Both { team1, team2 }),
        }
    }
}

fn build_payload(
    round: &Round,
    side: TeamSide,
    jury_id: i64,
    entry: &ScoreEntry,
) -> Result<OralMarksPayload> {
    let team = round.team(side).ok_or(ScoringError::MissingTeam {
        round_id: round.id,
        side,
    })?;

    let key = MarksKey::new(team.team_id.clone(), round.id, jury_id);
    let payload = OralMarksPayload::new(&key, prepare_submission(entry));
    payload.validate()?;
    Ok(payload)
}

fn plan_write<'a>(
    round: &Round,
    side: TeamSide,
    jury_id: i64,
    sheet: SheetSubmission<'a>,
) -> Result<TeamWrite<'a>> {
    match sheet.existing {
        Some(record) if round.status.is_finalized() => Ok(TeamWrite::Locked(record)),
        _ => Ok(TeamWrite::Upsert {
            payload: build_payload(round, side, jury_id, sheet.entry)?,
            existing_id: sheet.existing_id(),
        }),
    }
}

async fn write_team<S>(store: &S, write: &TeamWrite<'_>) -> Result<OralMarksRecord>
where
    S: MarksStore + ?Sized,
{
    match write {
        TeamWrite::Upsert {
            payload,
            existing_id,
        } => upsert_idempotent(store, payload, *existing_id).await,
        TeamWrite::Locked(record) => {
            debug!(key = %record.key(), "marks locked, keeping the stored record");
            Ok((*record).clone())
        }
    }
}

/// Creates or updates one record, reconciling a create that lost a race with
/// another writer for the same key.
async fn upsert_idempotent<S>(
    store: &S,
    payload: &OralMarksPayload,
    existing_id: Option<i64>,
) -> Result<OralMarksRecord>
where
    S: MarksStore + ?Sized,
{
    match store.upsert_marks(payload, existing_id).await {
        Err(ClientError::Conflict(body)) if existing_id.is_none() => {
            let key = payload.key();
            warn!(%key, "marks already exist, updating the stored record");

            match store.find_marks(&key).await? {
                Some(current) => store.upsert_marks(payload, Some(current.id)).await,
                None => Err(ClientError::Conflict(body)),
            }
        }
        other => other,
    }
}

/// Writes both teams' marks.
///
/// Payloads are built and validated for both teams before anything is sent,
/// so a malformed sheet never leaves one team written and the other not.
#[instrument(skip(store, round, team1, team2), fields(round_id = round.id))]
pub async fn submit_round<S>(
    store: &S,
    round: &Round,
    jury_id: i64,
    team1: SheetSubmission<'_>,
    team2: SheetSubmission<'_>,
) -> Result<RoundSubmission>
where
    S: MarksStore + ?Sized,
{
    let write1 = plan_write(round, TeamSide::Team1, jury_id, team1)?;
    let write2 = plan_write(round, TeamSide::Team2, jury_id, team2)?;

    let (team1, team2) = tokio::join!(write_team(store, &write1), write_team(store, &write2));

    let outcome = RoundSubmission { team1, team2 };
    for side in TeamSide::BOTH {
        match outcome.record(side) {
            Some(record) => info!(
                %side,
                team_id = %record.team_id,
                record_id = record.id,
                total = %record.total(),
                "oral marks saved"
            ),
            None => warn!(%side, "oral marks not saved"),
        }
    }

    Ok(outcome)
}

/// Like [`submit_round`], abandoned as soon as `cancel` resolves.
///
/// A cancel signal that is already resolved wins, and nothing is sent.
pub async fn submit_round_until<S, C>(
    store: &S,
    round: &Round,
    jury_id: i64,
    team1: SheetSubmission<'_>,
    team2: SheetSubmission<'_>,
    cancel: C,
) -> Result<RoundSubmission>
where
    S: MarksStore + ?Sized,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;

        _ = cancel => {
            info!(round_id = round.id, "submission cancelled");
            Err(ClientError::Cancelled)
        }
        result = submit_round(store, round, jury_id, team1, team2) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryBackend;
    use crate::hydration::fixtures::{JURY_ID, round};
    use crate::hydration::hydrate_round;
    use rust_decimal::Decimal;
    use scoring::services::scoring::{initialize_scores, set_score};
    use scoring::{GateState, RoundStatus};

    fn opener_entry() -> ScoreEntry {
        [
            ("knowledge_of_law", "20"),
            ("application_of_law_to_facts", "15"),
            ("ingenuity_and_ability_to_answer_questions", "10"),
            ("persuasiveness", "8"),
            ("time_management_and_organization", "9"),
            ("style_poise_courtesy_and_demeanor", "7"),
            ("language_and_presentation", "6"),
            ("overall_comments", "Strong opener"),
        ]
        .into_iter()
        .fold(initialize_scores(), |entry, (field, value)| {
            set_score(&entry, field, value)
        })
    }

    #[tokio::test]
    async fn test_submitted_marks_are_retrievable_by_key() {
        let r = round(3, RoundStatus::Ongoing);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        let entry = opener_entry();
        let blank = initialize_scores();

        let outcome = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&blank, None),
        )
        .await
        .unwrap();
        let (team1, team2) = outcome.into_result().unwrap();
        assert_eq!(team1.total(), Decimal::from(75));
        assert_eq!(team2.total(), Decimal::ZERO);
        assert_eq!(team2.overall_comments.as_deref(), Some(""));

        let key = MarksKey::new("TM-01", 3, JURY_ID);
        let stored = backend.find_marks(&key).await.unwrap().unwrap();
        assert_eq!(stored.id, team1.id);
        assert_eq!(stored.total(), Decimal::from(75));
        assert_eq!(stored.overall_comments.as_deref(), Some("Strong opener"));
    }

    #[tokio::test]
    async fn test_final_submission_locks_completed_round() {
        let r = round(5, RoundStatus::Completed);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);

        let before = hydrate_round(&backend, &r, JURY_ID).await;
        assert_eq!(
            before.gate(&r),
            GateState::Editable {
                marks_exist: false,
                final_submission: true
            }
        );

        let entry = opener_entry();
        submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap()
        .into_result()
        .unwrap();

        let after = hydrate_round(&backend, &r, JURY_ID).await;
        assert_eq!(after.gate(&r), GateState::Locked);
    }

    #[tokio::test]
    async fn test_partial_failure_names_the_failed_team() {
        let r = round(6, RoundStatus::Ongoing);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        backend.fail_upserts("TM-02", 1).await;
        let entry = opener_entry();

        let outcome = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap();
        assert!(!outcome.is_complete());

        let Err(SubmissionError::Partial {
            failed,
            source,
            saved,
        }) = outcome.into_result()
        else {
            panic!("expected a partial failure");
        };
        assert_eq!(failed, TeamSide::Team2);
        assert!(source.is_retryable());
        assert_eq!(saved.team_id, "TM-01");
        assert_eq!(backend.record_count().await, 1);

        let retry = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, Some(saved.as_ref())),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap();
        assert!(retry.is_complete());
        assert_eq!(backend.record_count().await, 2);
    }

    #[tokio::test]
    async fn test_retry_on_finalized_round_writes_only_the_missing_team() {
        let r = round(10, RoundStatus::Completed);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        backend.fail_upserts("TM-02", 1).await;
        let entry = opener_entry();

        let Err(SubmissionError::Partial { saved, .. }) = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap()
        .into_result() else {
            panic!("expected a partial failure");
        };

        let between = hydrate_round(&backend, &r, JURY_ID).await;
        assert_eq!(
            between.gate(&r),
            GateState::Editable {
                marks_exist: true,
                final_submission: true
            }
        );

        let revised = set_score(&entry, "knowledge_of_law", "5");
        let (team1, team2) = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&revised, Some(saved.as_ref())),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap()
        .into_result()
        .unwrap();
        assert_eq!(team1, *saved);
        assert_eq!(team1.total(), Decimal::from(75));
        assert_eq!(team2.team_id, "TM-02");
        assert_eq!(backend.record_count().await, 2);

        let after = hydrate_round(&backend, &r, JURY_ID).await;
        assert_eq!(after.gate(&r), GateState::Locked);
    }

    #[tokio::test]
    async fn test_both_failures_are_reported() {
        let r = round(6, RoundStatus::Ongoing);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        backend.fail_upserts("TM-01", 1).await;
        backend.fail_upserts("TM-02", 1).await;
        let entry = opener_entry();

        let err = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
        )
        .await
        .unwrap()
        .into_result()
        .unwrap_err();
        assert_eq!(err.failed_sides(), vec![TeamSide::Team1, TeamSide::Team2]);
    }

    #[tokio::test]
    async fn test_duplicate_create_updates_existing_record() {
        let r = round(7, RoundStatus::Ongoing);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        let first = opener_entry();

        let (saved1, _) = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&first, None),
            SheetSubmission::new(&first, None),
        )
        .await
        .unwrap()
        .into_result()
        .unwrap();

        let revised = set_score(&first, "knowledge_of_law", "25");
        let (again1, _) = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&revised, None),
            SheetSubmission::new(&first, None),
        )
        .await
        .unwrap()
        .into_result()
        .unwrap();

        assert_eq!(again1.id, saved1.id);
        assert_eq!(again1.total(), Decimal::from(80));
        assert_eq!(backend.record_count().await, 2);
    }

    #[tokio::test]
    async fn test_round_without_opponent_sends_nothing() {
        let mut r = round(8, RoundStatus::Ongoing);
        r.team2 = None;
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        let entry = opener_entry();

        let result = submit_round(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
        )
        .await;
        assert!(matches!(
            result,
            Err(ClientError::Scoring(ScoringError::MissingTeam {
                side: TeamSide::Team2,
                ..
            }))
        ));
        assert_eq!(backend.record_count().await, 0);
    }

    #[tokio::test]
    async fn test_cancelled_submission_writes_nothing() {
        let r = round(9, RoundStatus::Ongoing);
        let backend = InMemoryBackend::with_rounds(vec![r.clone()]);
        let entry = opener_entry();

        let result = submit_round_until(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
            std::future::ready(()),
        )
        .await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(backend.record_count().await, 0);

        let completed = submit_round_until(
            &backend,
            &r,
            JURY_ID,
            SheetSubmission::new(&entry, None),
            SheetSubmission::new(&entry, None),
            std::future::pending(),
        )
        .await
        .unwrap();
        assert!(completed.is_complete());
    }
}
