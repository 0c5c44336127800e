//! Match (game) record and its status.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match: `Pending -> InProgress -> Completed`. `Completed` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    /// A partial score was recorded, no winner yet.
    InProgress,
    Completed,
}

/// One scheduled or completed fixture. Either team slot may be empty: a bye, or a
/// later elimination round still waiting for its feeder match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based.
    pub round: u32,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    /// None until decided.
    pub winner_id: Option<TeamId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub status: MatchStatus,
    pub is_bye: bool,
}

impl GameMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        team1_id: Option<TeamId>,
        team2_id: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            team1_id,
            team2_id,
            winner_id: None,
            team1_score: None,
            team2_score: None,
            status: MatchStatus::Pending,
            is_bye: false,
        }
    }

    /// A match with no opponent, already completed with `team_id` as winner.
    pub fn bye(tournament_id: TournamentId, round: u32, team_id: TeamId) -> Self {
        let mut m = Self::new(tournament_id, round, Some(team_id), None);
        m.complete_as_bye(team_id);
        m
    }

    /// Turn this match into a completed bye won by `team_id`.
    pub fn complete_as_bye(&mut self, team_id: TeamId) {
        self.is_bye = true;
        self.winner_id = Some(team_id);
        self.status = MatchStatus::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn has_participant(&self, team_id: TeamId) -> bool {
        self.team1_id == Some(team_id) || self.team2_id == Some(team_id)
    }

    /// Both slots filled.
    pub fn is_ready(&self) -> bool {
        self.team1_id.is_some() && self.team2_id.is_some()
    }

    /// The other participant, if `team_id` plays in this match and has an opponent.
    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        if self.team1_id == Some(team_id) {
            self.team2_id
        } else if self.team2_id == Some(team_id) {
            self.team1_id
        } else {
            None
        }
    }

    /// True if the same two teams meet in both matches, in either slot order.
    pub fn same_pairing(&self, other: &GameMatch) -> bool {
        match (self.team1_id, self.team2_id) {
            (Some(a), Some(b)) => other.has_participant(a) && other.has_participant(b),
            _ => false,
        }
    }
}
