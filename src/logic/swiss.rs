//! Swiss system: one round at a time, paired by current points.

use crate::models::{GameMatch, Team, TournamentId};

/// Pair the next Swiss round.
///
/// 1. Drop removed teams.
/// 2. Round 1 keeps input order; later rounds sort by points descending (stable, so
///    equal points keep input order).
/// 3. Pair down the list (1 vs 2, 3 vs 4, ...); an odd team out gets a completed bye.
///
/// Standings come from `teams`, which the resolver keeps current. Rematches are not
/// avoided; `previous_matches` is only used to report them.
pub fn generate_swiss_system_round(
    tournament_id: TournamentId,
    teams: &[Team],
    round_number: u32,
    previous_matches: &[GameMatch],
) -> Vec<GameMatch> {
    let mut active: Vec<&Team> = teams.iter().filter(|t| !t.is_removed).collect();
    if active.len() < 2 {
        return Vec::new();
    }
    if round_number > 1 {
        active.sort_by(|a, b| b.points.cmp(&a.points));
    }

    let matches: Vec<GameMatch> = active
        .chunks(2)
        .map(|pair| {
            if let [a, b] = pair {
                GameMatch::new(tournament_id, round_number, Some(a.id), Some(b.id))
            } else {
                GameMatch::bye(tournament_id, round_number, pair[0].id)
            }
        })
        .collect();

    let rematches = count_rematches(&matches, previous_matches);
    if rematches > 0 {
        log::debug!(
            "Swiss round {} repeats {} earlier pairing(s)",
            round_number,
            rematches
        );
    }
    matches
}

/// How many of `matches` pair two teams that already met in `previous`.
pub fn count_rematches(matches: &[GameMatch], previous: &[GameMatch]) -> usize {
    matches
        .iter()
        .filter(|m| previous.iter().any(|p| !p.is_bye && m.same_pairing(p)))
        .count()
}
