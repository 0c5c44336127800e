//! Round robin: every team meets every other team once.

use crate::models::{GameMatch, Team, TournamentId};

/// One pending match per unordered pair, `teams[i]` vs `teams[j]` for all `i < j`.
///
/// All matches are scheduled in round 1. Odd team counts need no byes.
pub fn generate_round_robin_bracket(tournament_id: TournamentId, teams: &[Team]) -> Vec<GameMatch> {
    let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            matches.push(GameMatch::new(tournament_id, 1, Some(home.id), Some(away.id)));
        }
    }
    log::debug!(
        "Generated round robin: {} teams, {} matches",
        teams.len(),
        matches.len()
    );
    matches
}
