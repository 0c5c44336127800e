//! Data structures for community tournaments: teams, matches, tournament context.

mod game;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus};
pub use team::{Team, TeamId, POINTS_PER_WIN};
pub use tournament::{
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentStatus,
    DEFAULT_SWISS_ROUNDS,
};
