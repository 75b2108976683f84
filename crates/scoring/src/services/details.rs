//! Round details view model: what a juror sees when opening a round.

use crate::models::{Round, RoundStatus, RoundTeam, RoundType, TeamSide};
use crate::services::gating::GateState;

/// Where the round takes place, as far as the juror may know right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    Venue(Option<&'a str>),
    /// Online round that has not started; the link is withheld.
    MeetingLinkPending,
    MeetingLink(Option<&'a str>),
    /// Finished rounds do not show a location.
    Hidden,
}

#[derive(Debug, Clone, Copy)]
pub struct RoundDetails<'a> {
    round: &'a Round,
    gate: GateState,
}

impl<'a> RoundDetails<'a> {
    pub fn new(round: &'a Round, gate: GateState) -> Self {
        Self { round, gate }
    }

    pub fn round(&self) -> &'a Round {
        self.round
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    fn status(&self) -> RoundStatus {
        self.round.status.display_status()
    }

    pub fn description(&self) -> &'static str {
        if self.status() == RoundStatus::Upcoming {
            "Basic round information (Full details available after round starts)"
        } else {
            "Detailed information about this round"
        }
    }

    /// Rosters, memorials and the winner are hidden until the round starts.
    pub fn shows_teams(&self) -> bool {
        self.status() != RoundStatus::Upcoming
    }

    pub fn team(&self, side: TeamSide) -> Option<&'a RoundTeam> {
        if self.shows_teams() {
            self.round.team(side)
        } else {
            None
        }
    }

    /// Quick-join link for a live online round.
    pub fn join_link(&self) -> Option<&'a str> {
        if self.status() != RoundStatus::Ongoing || self.round.round_type != RoundType::Online {
            return None;
        }
        self.round.meet_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn location(&self) -> Location<'a> {
        let status = self.status();
        if !matches!(status, RoundStatus::Upcoming | RoundStatus::Ongoing) {
            return Location::Hidden;
        }

        match self.round.round_type {
            RoundType::Offline => Location::Venue(self.round.venue.as_deref()),
            RoundType::Online if status == RoundStatus::Upcoming => Location::MeetingLinkPending,
            RoundType::Online => Location::MeetingLink(self.round.meet_url.as_deref()),
        }
    }

    pub fn winner(&self) -> Option<&'a str> {
        if self.shows_teams() {
            self.round.winner_code()
        } else {
            None
        }
    }

    pub fn upcoming_notice(&self) -> Option<String> {
        if self.shows_teams() {
            return None;
        }
        Some(format!(
            "Team details will be available once the round begins. Please check back on {} at {}",
            self.round.date, self.round.time
        ))
    }
}
