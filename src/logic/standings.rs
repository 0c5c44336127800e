//! Leaderboard ordering.

use crate::models::Team;

/// Teams ordered by points (desc), then wins (desc), then losses (asc).
/// Full ties keep their given order.
pub fn standings(teams: &[Team]) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.wins.cmp(&a.wins))
            .then(a.losses.cmp(&b.losses))
    });
    ranked
}
