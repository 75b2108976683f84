//! Round-lifecycle gating: decides whether marks entry is open for a round.
//!
//! The state is recomputed from `(status, marks presence)` every time; nothing
//! here is persisted.

use serde::Serialize;

use crate::models::RoundStatus;

/// What is known about existing oral-marks records for a round and juror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarksPresence {
    /// Lookups still in flight, or at least one of them failed.
    Unknown,
    /// No record for either team.
    Absent,
    /// A record exists for one team only.
    Partial,
    /// Both teams have a record.
    Present,
}

impl MarksPresence {
    pub fn from_flags(team1: bool, team2: bool) -> Self {
        match (team1, team2) {
            (true, true) => MarksPresence::Present,
            (false, false) => MarksPresence::Absent,
            _ => MarksPresence::Partial,
        }
    }
}

/// View state of a round for a juror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    /// Round has not started: coarse metadata only, no scoring entry point.
    UpcomingLimited,
    /// Existing marks are not known yet. Entry stays closed and no lock is
    /// asserted until the lookups resolve.
    Pending,
    /// Scoring form reachable; submissions upsert.
    Editable {
        marks_exist: bool,
        /// The round is already finalized, so this submission locks the marks
        /// of every team it saves.
        final_submission: bool,
    },
    /// Both teams' marks were submitted on a finalized round; the control is
    /// shown disabled.
    Locked,
}

impl GateState {
    /// Gates on the raw status: anything that is neither upcoming nor ongoing,
    /// unrecognized values included, counts as finalized.
    pub fn evaluate(status: &RoundStatus, presence: MarksPresence) -> Self {
        match (status, presence) {
            (RoundStatus::Upcoming, _) => GateState::UpcomingLimited,
            (_, MarksPresence::Unknown) => GateState::Pending,
            (RoundStatus::Ongoing, known) => GateState::Editable {
                marks_exist: known != MarksPresence::Absent,
                final_submission: false,
            },
            (_, MarksPresence::Present) => GateState::Locked,
            (_, known) => GateState::Editable {
                marks_exist: known == MarksPresence::Partial,
                final_submission: true,
            },
        }
    }

    pub fn can_enter_marks(&self) -> bool {
        matches!(self, GateState::Editable { .. })
    }

    /// Caption of the marks control, if one is shown at all.
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            GateState::UpcomingLimited => None,
            GateState::Pending => Some("Loading marks..."),
            GateState::Editable {
                marks_exist: true, ..
            } => Some("Edit Marks"),
            GateState::Editable { .. } => Some("Enter Marks"),
            GateState::Locked => Some("Locked"),
        }
    }
}
