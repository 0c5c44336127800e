//! Match update submission: the guards a caller runs around the resolver.

use crate::logic::progression::{record_partial_score, resolve_match_completion, MatchResult};
use crate::models::{GameMatch, MatchId, Team, TeamId, Tournament, TournamentError};
use serde::{Deserialize, Serialize};

/// A reported score, or a result when `winner_id` is set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    /// Without a winner only the scores are recorded (match goes in_progress).
    #[serde(default)]
    pub winner_id: Option<TeamId>,
    #[serde(default)]
    pub team1_score: Option<u32>,
    #[serde(default)]
    pub team2_score: Option<u32>,
}

/// What a submitted update changed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchUpdateOutcome {
    /// Partial score recorded.
    Scored,
    /// Result resolved and every resulting mutation applied.
    Resolved { tournament_completed: bool },
}

/// Apply one update to a tournament's state.
///
/// Refuses matches that are already completed and winners that do not play in the
/// match. A result runs [`resolve_match_completion`] and applies the whole
/// [`crate::MatchProgression`]; on any error nothing is changed.
pub fn submit_match_update(
    tournament: &mut Tournament,
    matches: &mut Vec<GameMatch>,
    teams: &mut [Team],
    match_id: MatchId,
    update: &MatchUpdate,
) -> Result<MatchUpdateOutcome, TournamentError> {
    let game = matches
        .iter()
        .find(|m| m.id == match_id)
        .cloned()
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let was_already_completed = game.is_completed();
    if was_already_completed {
        return Err(TournamentError::MatchAlreadyCompleted(game.id));
    }

    let Some(winner_id) = update.winner_id else {
        let updated = record_partial_score(&game, update.team1_score, update.team2_score)?;
        if let Some(m) = matches.iter_mut().find(|m| m.id == updated.id) {
            *m = updated;
        }
        return Ok(MatchUpdateOutcome::Scored);
    };
    if !game.has_participant(winner_id) {
        return Err(TournamentError::InvalidWinner {
            match_id: game.id,
            winner_id,
        });
    }

    let result = MatchResult {
        winner_id,
        team1_score: update.team1_score,
        team2_score: update.team2_score,
    };
    let progression =
        resolve_match_completion(&game, &result, tournament, matches.as_slice(), teams)?;
    let tournament_completed = progression.tournament_completed;
    progression.apply(tournament, matches, teams);
    Ok(MatchUpdateOutcome::Resolved {
        tournament_completed,
    })
}
