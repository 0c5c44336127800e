//! Match progression: apply one completed match to standings and the bracket.
//!
//! The resolver only computes. Everything it decides is returned as a
//! [`MatchProgression`], which the caller must apply as one unit.

use crate::logic::single_elimination::{advance_winner, round_position};
use crate::logic::swiss::generate_swiss_system_round;
use crate::models::{
    GameMatch, MatchStatus, Team, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentStatus,
};
use serde::{Deserialize, Serialize};

/// Reported outcome of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner_id: TeamId,
    #[serde(default)]
    pub team1_score: Option<u32>,
    #[serde(default)]
    pub team2_score: Option<u32>,
}

/// Mutations produced by resolving one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchProgression {
    /// The resolved match, now completed.
    pub completed_match: GameMatch,
    /// Winner and loser with updated standings.
    pub updated_teams: Vec<Team>,
    /// Later elimination matches that received the winner (and any pass-through byes).
    pub advanced_matches: Vec<GameMatch>,
    /// Next Swiss round, if one was generated.
    pub new_matches: Vec<GameMatch>,
    /// New `current_round`, if the Swiss round advanced.
    pub current_round: Option<u32>,
    /// No further matches will be played.
    pub tournament_completed: bool,
}

impl MatchProgression {
    /// Write every mutation into the caller's state in one step.
    pub fn apply(
        self,
        tournament: &mut Tournament,
        matches: &mut Vec<GameMatch>,
        teams: &mut [Team],
    ) {
        for updated in std::iter::once(self.completed_match).chain(self.advanced_matches) {
            match matches.iter_mut().find(|m| m.id == updated.id) {
                Some(m) => *m = updated,
                None => matches.push(updated),
            }
        }
        for updated in self.updated_teams {
            if let Some(t) = teams.iter_mut().find(|t| t.id == updated.id) {
                *t = updated;
            }
        }
        matches.extend(self.new_matches);
        if let Some(round) = self.current_round {
            tournament.current_round = round;
        }
        if self.tournament_completed {
            tournament.status = TournamentStatus::Completed;
        }
    }
}

/// Resolve a newly completed match.
///
/// `game` is the match being reported; neither it nor its copy in `all_matches` may be
/// completed yet, and both slots must be filled. The winner gets a win and [`crate::POINTS_PER_WIN`], the loser a loss.
/// Then, by format:
///
/// - single elimination: the winner moves into the next round's match at
///   `index / 2`, team 1 slot for even `index`, team 2 slot for odd;
/// - swiss: once every match of `current_round` is completed, the next round is paired
///   from the updated standings, until the round target is reached;
/// - round robin: standings only.
pub fn resolve_match_completion(
    game: &GameMatch,
    result: &MatchResult,
    tournament: &Tournament,
    all_matches: &[GameMatch],
    all_teams: &[Team],
) -> Result<MatchProgression, TournamentError> {
    if game.tournament_id != tournament.id {
        return Err(TournamentError::WrongTournament(game.id));
    }
    if game.is_completed() {
        return Err(TournamentError::MatchAlreadyCompleted(game.id));
    }
    if !game.is_ready() {
        return Err(TournamentError::MatchNotReady(game.id));
    }
    let winner_id = result.winner_id;
    let loser_id = game
        .opponent_of(winner_id)
        .ok_or(TournamentError::InvalidWinner {
            match_id: game.id,
            winner_id,
        })?;

    let mut completed = game.clone();
    completed.winner_id = Some(winner_id);
    completed.team1_score = result.team1_score.or(game.team1_score);
    completed.team2_score = result.team2_score.or(game.team2_score);
    completed.status = MatchStatus::Completed;

    let mut teams = all_teams.to_vec();
    team_mut(&mut teams, winner_id)?.record_win();
    team_mut(&mut teams, loser_id)?.record_loss();
    let updated_teams: Vec<Team> = teams
        .iter()
        .filter(|t| t.id == winner_id || t.id == loser_id)
        .cloned()
        .collect();

    let mut matches = all_matches.to_vec();
    let stored = matches
        .iter_mut()
        .find(|m| m.id == completed.id)
        .ok_or(TournamentError::MatchNotFound(completed.id))?;
    if stored.is_completed() {
        return Err(TournamentError::MatchAlreadyCompleted(completed.id));
    }
    *stored = completed.clone();

    let mut progression = MatchProgression {
        completed_match: completed,
        updated_teams,
        advanced_matches: Vec::new(),
        new_matches: Vec::new(),
        current_round: None,
        tournament_completed: false,
    };

    match tournament.format {
        TournamentFormat::SingleElimination => {
            let game = &progression.completed_match;
            let index = round_position(&matches, game)
                .ok_or(TournamentError::MatchNotFound(game.id))?;
            let changed = advance_winner(&mut matches, game.round, index, winner_id)?;
            progression.advanced_matches =
                changed.into_iter().map(|i| matches[i].clone()).collect();
            progression.tournament_completed = matches.iter().all(GameMatch::is_completed);
        }
        TournamentFormat::RoundRobin => {
            progression.tournament_completed = matches.iter().all(GameMatch::is_completed);
        }
        TournamentFormat::Swiss => {
            let round = tournament.current_round;
            let round_done = matches
                .iter()
                .filter(|m| m.round == round)
                .all(GameMatch::is_completed);
            if round_done {
                let next = if round < tournament.swiss_round_target() {
                    generate_swiss_system_round(tournament.id, &teams, round + 1, &matches)
                } else {
                    Vec::new()
                };
                if next.is_empty() {
                    progression.tournament_completed = true;
                } else {
                    log::info!(
                        "Tournament {}: swiss round {} complete, paired round {} ({} matches)",
                        tournament.id,
                        round,
                        round + 1,
                        next.len()
                    );
                    progression.new_matches = next;
                    progression.current_round = Some(round + 1);
                }
            }
        }
    }

    if progression.tournament_completed {
        log::info!("Tournament {}: all matches completed", tournament.id);
    }
    Ok(progression)
}

/// Record a partial score without a winner. The match moves to `InProgress`.
/// Both teams must be known.
pub fn record_partial_score(
    game: &GameMatch,
    team1_score: Option<u32>,
    team2_score: Option<u32>,
) -> Result<GameMatch, TournamentError> {
    if game.is_completed() {
        return Err(TournamentError::MatchAlreadyCompleted(game.id));
    }
    if !game.is_ready() {
        return Err(TournamentError::MatchNotReady(game.id));
    }
    let mut updated = game.clone();
    updated.team1_score = team1_score.or(game.team1_score);
    updated.team2_score = team2_score.or(game.team2_score);
    updated.status = MatchStatus::InProgress;
    Ok(updated)
}

fn team_mut(teams: &mut [Team], id: TeamId) -> Result<&mut Team, TournamentError> {
    teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TournamentError::TeamNotFound(id))
}
