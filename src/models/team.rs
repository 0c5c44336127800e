//! Team data structure and standings bookkeeping.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Points awarded to the winner of a match.
pub const POINTS_PER_WIN: u32 = 3;

/// A tournament participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    /// Manually eliminated by an organizer. Removed teams are kept, never deleted.
    pub is_removed: bool,
}

impl Team {
    /// Create a new team with the given name. Standings start at zero.
    pub fn new(tournament_id: TournamentId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            wins: 0,
            losses: 0,
            points: 0,
            is_removed: false,
        }
    }

    /// Record a match win.
    pub fn record_win(&mut self) {
        self.wins += 1;
        self.points += POINTS_PER_WIN;
    }

    /// Record a match loss.
    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn remove(&mut self) {
        self.is_removed = true;
    }
}
