//! Single elimination: the whole bracket is created up front, later rounds empty-slotted.
//!
//! Round 1 holds `ceil(n/2)` matches and every later round `ceil(prev/2)`, down to one
//! final. Match `j` of a later round is fed by matches `2j` (team 1 slot) and `2j + 1`
//! (team 2 slot) of the round before. A match with only one feeder is a pass-through
//! bye: it completes as soon as that feeder's winner arrives.

use crate::models::{GameMatch, Team, TeamId, TournamentError, TournamentId};

/// Build every round of a single-elimination bracket, pairing teams in the given order.
///
/// Round-1 byes are completed immediately and their winners already sit in the
/// next round. Fewer than two teams produce no matches.
pub fn generate_single_elimination_bracket(
    tournament_id: TournamentId,
    teams: &[Team],
) -> Vec<GameMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let sizes = round_sizes(teams.len());
    let mut matches = Vec::with_capacity(sizes.iter().sum());

    for pair in teams.chunks(2) {
        let m = if let [a, b] = pair {
            GameMatch::new(tournament_id, 1, Some(a.id), Some(b.id))
        } else {
            GameMatch::bye(tournament_id, 1, pair[0].id)
        };
        matches.push(m);
    }
    for (i, &size) in sizes.iter().enumerate().skip(1) {
        let round = i as u32 + 1;
        matches.extend((0..size).map(|_| GameMatch::new(tournament_id, round, None, None)));
    }

    let byes: Vec<(usize, TeamId)> = matches
        .iter()
        .take(sizes[0])
        .enumerate()
        .filter(|(_, m)| m.is_bye)
        .filter_map(|(i, m)| m.winner_id.map(|w| (i, w)))
        .collect();
    for (index, winner) in byes {
        // A freshly built bracket has every slot the bye needs.
        if let Err(e) = advance_winner(&mut matches, 1, index, winner) {
            log::warn!("Could not seat bye winner {}: {}", winner, e);
        }
    }

    log::debug!(
        "Generated single elimination bracket: {} teams, {} rounds, {} matches",
        teams.len(),
        sizes.len(),
        matches.len()
    );
    matches
}

/// Number of rounds for `team_count` teams: `ceil(log2(n))`, zero below two teams.
pub fn total_rounds(team_count: usize) -> u32 {
    if team_count < 2 {
        return 0;
    }
    round_sizes(team_count).len() as u32
}

/// Matches per round, round 1 first.
fn round_sizes(team_count: usize) -> Vec<usize> {
    let mut sizes = vec![team_count.div_ceil(2)];
    while let Some(&last) = sizes.last() {
        if last <= 1 {
            break;
        }
        sizes.push(last.div_ceil(2));
    }
    sizes
}

/// Indices into `matches` of the matches in `round`, in list order.
fn round_indices(matches: &[GameMatch], round: u32) -> Vec<usize> {
    matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.round == round)
        .map(|(i, _)| i)
        .collect()
}

/// Position of a match among the matches of its round.
pub(crate) fn round_position(matches: &[GameMatch], game: &GameMatch) -> Option<usize> {
    matches
        .iter()
        .filter(|m| m.round == game.round)
        .position(|m| m.id == game.id)
}

/// Write `winner` of match `index` in `round` into the slot it feeds.
///
/// Cascades through pass-through byes. Returns the indices into `matches` of every
/// match that changed; empty when `round` is the final.
pub(crate) fn advance_winner(
    matches: &mut [GameMatch],
    round: u32,
    index: usize,
    winner: TeamId,
) -> Result<Vec<usize>, TournamentError> {
    let mut changed = Vec::new();
    let (mut round, mut index) = (round, index);
    loop {
        let next_round = round + 1;
        let next = round_indices(matches, next_round);
        if next.is_empty() {
            return Ok(changed);
        }
        let next_index = index / 2;
        let slot = *next
            .get(next_index)
            .ok_or(TournamentError::MissingNextRoundMatch {
                round: next_round,
                index: next_index,
            })?;
        let feeders = round_indices(matches, round).len();

        let target = &mut matches[slot];
        let target_id = target.id;
        let seat = if index % 2 == 0 {
            &mut target.team1_id
        } else {
            &mut target.team2_id
        };
        match *seat {
            Some(existing) if existing != winner => {
                return Err(TournamentError::NextRoundSlotTaken {
                    match_id: target_id,
                    team_id: existing,
                });
            }
            _ => *seat = Some(winner),
        }
        if !changed.contains(&slot) {
            changed.push(slot);
        }

        let lone_feeder = index % 2 == 0 && index + 1 >= feeders;
        if !lone_feeder {
            return Ok(changed);
        }
        target.complete_as_bye(winner);
        round = next_round;
        index = next_index;
    }
}
