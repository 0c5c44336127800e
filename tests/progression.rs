//! Integration tests for match result resolution: standings, bracket advancement, guards.

use community_tournament_web::{
    create_tournament_bracket, record_partial_score, resolve_match_completion, GameMatch,
    MatchProgression, MatchResult, MatchStatus, Seeding, Team, TeamId, Tournament,
    TournamentError, TournamentFormat, TournamentStatus, POINTS_PER_WIN,
};

struct Event {
    tournament: Tournament,
    teams: Vec<Team>,
    matches: Vec<GameMatch>,
}

impl Event {
    fn start(format: TournamentFormat, n: usize) -> Self {
        let mut tournament = Tournament::new("Cup", format);
        let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let bracket = create_tournament_bracket(&mut tournament, &names, Seeding::AsEntered).unwrap();
        Self {
            tournament,
            teams: bracket.teams,
            matches: bracket.matches,
        }
    }

    fn team(&self, i: usize) -> TeamId {
        self.teams[i].id
    }

    fn round(&self, r: u32) -> Vec<GameMatch> {
        self.matches.iter().filter(|m| m.round == r).cloned().collect()
    }

    fn try_resolve(&self, game: &GameMatch, winner: TeamId) -> Result<MatchProgression, TournamentError> {
        let result = MatchResult {
            winner_id: winner,
            team1_score: Some(3),
            team2_score: Some(1),
        };
        resolve_match_completion(game, &result, &self.tournament, &self.matches, &self.teams)
    }

    /// Resolve and apply, returning what the resolver produced.
    fn resolve(&mut self, game: &GameMatch, winner: TeamId) -> MatchProgression {
        let p = self.try_resolve(game, winner).unwrap();
        p.clone()
            .apply(&mut self.tournament, &mut self.matches, &mut self.teams);
        p
    }
}

#[test]
fn winner_and_loser_standings_update() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 3);
    let game = e.matches[0].clone();
    let p = e.resolve(&game, e.team(0));

    assert_eq!(p.updated_teams.len(), 2);
    assert_eq!(p.completed_match.status, MatchStatus::Completed);
    assert_eq!(p.completed_match.winner_id, Some(e.team(0)));
    assert_eq!(p.completed_match.team1_score, Some(3));
    assert_eq!(p.completed_match.team2_score, Some(1));

    assert_eq!(e.teams[0].wins, 1);
    assert_eq!(e.teams[0].points, POINTS_PER_WIN);
    assert_eq!(e.teams[0].losses, 0);
    assert_eq!(e.teams[1].losses, 1);
    assert_eq!(e.teams[1].points, 0);
    assert_eq!(e.teams[2].wins + e.teams[2].losses, 0);
}

#[test]
fn winners_fill_final_slots_by_feeder_index() {
    let mut e = Event::start(TournamentFormat::SingleElimination, 4);
    let r1 = e.round(1);

    let p = e.resolve(&r1[0], e.team(0));
    assert_eq!(p.advanced_matches.len(), 1);
    assert_eq!(p.advanced_matches[0].team1_id, Some(e.team(0)));
    assert_eq!(p.advanced_matches[0].team2_id, None);
    assert!(!p.tournament_completed);

    e.resolve(&r1[1], e.team(3));
    let final_match = e.round(2)[0].clone();
    assert_eq!(final_match.team1_id, Some(e.team(0)));
    assert_eq!(final_match.team2_id, Some(e.team(3)));
    assert_eq!(final_match.status, MatchStatus::Pending);
}

#[test]
fn final_completes_single_elimination() {
    let mut e = Event::start(TournamentFormat::SingleElimination, 2);
    let final_match = e.matches[0].clone();
    let p = e.resolve(&final_match, e.team(1));
    assert!(p.advanced_matches.is_empty());
    assert!(p.tournament_completed);
    assert_eq!(e.tournament.status, TournamentStatus::Completed);
}

#[test]
fn bracket_with_byes_plays_to_a_single_champion() {
    for n in 2..=17usize {
        let mut e = Event::start(TournamentFormat::SingleElimination, n);
        while let Some(game) = e
            .matches
            .iter()
            .find(|m| !m.is_completed() && m.is_ready())
            .cloned()
        {
            e.resolve(&game, game.team1_id.unwrap());
        }
        assert!(e.matches.iter().all(GameMatch::is_completed), "n = {n}");
        assert_eq!(e.tournament.status, TournamentStatus::Completed, "n = {n}");
        // Every real match eliminates one team.
        let losses: u32 = e.teams.iter().map(|t| t.losses).sum();
        assert_eq!(losses as usize, n - 1, "n = {n}");
        // Team 1 always wins, so the first seed takes the title.
        let champion = e.matches.last().and_then(|m| m.winner_id);
        assert_eq!(champion, Some(e.team(0)), "n = {n}");
    }
}

#[test]
fn five_team_bracket_final_meets_bye_team() {
    let mut e = Event::start(TournamentFormat::SingleElimination, 5);
    let r1 = e.round(1);
    e.resolve(&r1[0], e.team(0));
    e.resolve(&r1[1], e.team(2));
    let semi = e.round(2)[0].clone();
    let p = e.resolve(&semi, e.team(2));
    let final_match = &p.advanced_matches[0];
    assert_eq!(final_match.round, 3);
    assert_eq!(final_match.team1_id, Some(e.team(2)));
    assert_eq!(final_match.team2_id, Some(e.team(4)));
    assert_eq!(e.teams[2].wins, 2);
    assert_eq!(e.teams[2].points, 2 * POINTS_PER_WIN);
}

#[test]
fn completed_match_is_rejected() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 2);
    let game = e.matches[0].clone();
    e.resolve(&game, e.team(0));

    let stored = e.matches[0].clone();
    assert!(matches!(
        e.try_resolve(&stored, e.team(0)),
        Err(TournamentError::MatchAlreadyCompleted(id)) if id == stored.id
    ));
    assert_eq!(e.teams[0].wins, 1);
    assert_eq!(e.teams[0].points, POINTS_PER_WIN);
}

#[test]
fn stored_completed_match_rejects_stale_copy() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 2);
    let stale = e.matches[0].clone();
    e.resolve(&stale, e.team(0));

    // The caller's copy still reads pending, the stored one is completed.
    assert_eq!(stale.status, MatchStatus::Pending);
    assert_eq!(
        e.try_resolve(&stale, e.team(0)),
        Err(TournamentError::MatchAlreadyCompleted(stale.id))
    );
    assert_eq!(e.teams[0].wins, 1);
    assert_eq!(e.teams[1].losses, 1);
}

#[test]
fn stale_match_list_double_counts() {
    // Resolving against an old snapshot of the whole match list cannot be detected:
    // standings get applied twice.
    let mut e = Event::start(TournamentFormat::RoundRobin, 2);
    let stale = e.matches[0].clone();
    let stale_matches = e.matches.clone();
    e.resolve(&stale, e.team(0));

    let result = MatchResult {
        winner_id: e.team(0),
        team1_score: None,
        team2_score: None,
    };
    let p = resolve_match_completion(&stale, &result, &e.tournament, &stale_matches, &e.teams)
        .unwrap();
    p.apply(&mut e.tournament, &mut e.matches, &mut e.teams);
    assert_eq!(e.teams[0].wins, 2);
    assert_eq!(e.teams[0].points, 2 * POINTS_PER_WIN);
    assert_eq!(e.teams[1].losses, 2);
}

#[test]
fn winner_must_be_a_participant() {
    let e = Event::start(TournamentFormat::RoundRobin, 3);
    let game = e.matches[0].clone();
    assert_eq!(
        e.try_resolve(&game, e.team(2)),
        Err(TournamentError::InvalidWinner {
            match_id: game.id,
            winner_id: e.team(2),
        })
    );
}

#[test]
fn match_waiting_for_feeder_is_not_ready() {
    let e = Event::start(TournamentFormat::SingleElimination, 4);
    let final_match = e.round(2)[0].clone();
    assert_eq!(
        e.try_resolve(&final_match, e.team(0)),
        Err(TournamentError::MatchNotReady(final_match.id))
    );
}

#[test]
fn match_from_other_tournament_is_rejected() {
    let e = Event::start(TournamentFormat::RoundRobin, 2);
    let other = Event::start(TournamentFormat::RoundRobin, 2);
    let game = other.matches[0].clone();
    assert_eq!(
        e.try_resolve(&game, other.team(0)),
        Err(TournamentError::WrongTournament(game.id))
    );
}

#[test]
fn missing_next_round_match_is_an_error() {
    let mut e = Event::start(TournamentFormat::SingleElimination, 8);
    let r2_second = e.round(2)[1].id;
    e.matches.retain(|m| m.id != r2_second);
    let game = e.round(1)[2].clone();
    assert_eq!(
        e.try_resolve(&game, e.team(4)),
        Err(TournamentError::MissingNextRoundMatch { round: 2, index: 1 })
    );
}

#[test]
fn occupied_next_round_slot_is_an_error() {
    let mut e = Event::start(TournamentFormat::SingleElimination, 4);
    let final_id = e.round(2)[0].id;
    let intruder = e.team(3);
    if let Some(m) = e.matches.iter_mut().find(|m| m.id == final_id) {
        m.team1_id = Some(intruder);
    }
    let game = e.round(1)[0].clone();
    assert_eq!(
        e.try_resolve(&game, e.team(0)),
        Err(TournamentError::NextRoundSlotTaken {
            match_id: final_id,
            team_id: intruder,
        })
    );
}

#[test]
fn round_robin_completes_after_last_match() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 4);
    let all = e.matches.clone();
    for (i, game) in all.iter().enumerate() {
        let p = e.resolve(game, game.team2_id.unwrap());
        assert!(p.advanced_matches.is_empty());
        assert!(p.new_matches.is_empty());
        assert_eq!(p.tournament_completed, i == all.len() - 1);
    }
    assert_eq!(e.tournament.status, TournamentStatus::Completed);
    let wins: u32 = e.teams.iter().map(|t| t.wins).sum();
    assert_eq!(wins, 6);
}

#[test]
fn partial_score_marks_match_in_progress() {
    let e = Event::start(TournamentFormat::RoundRobin, 2);
    let game = e.matches[0].clone();
    let updated = record_partial_score(&game, Some(1), None).unwrap();
    assert_eq!(updated.status, MatchStatus::InProgress);
    assert_eq!(updated.team1_score, Some(1));
    assert_eq!(updated.team2_score, None);
    assert_eq!(updated.winner_id, None);

    let later = record_partial_score(&updated, None, Some(2)).unwrap();
    assert_eq!(later.team1_score, Some(1));
    assert_eq!(later.team2_score, Some(2));
}

#[test]
fn in_progress_match_can_still_be_resolved() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 2);
    let game = record_partial_score(&e.matches[0], Some(1), Some(1)).unwrap();
    e.matches[0] = game.clone();
    let result = MatchResult {
        winner_id: e.team(1),
        team1_score: None,
        team2_score: Some(2),
    };
    let p = resolve_match_completion(&game, &result, &e.tournament, &e.matches, &e.teams).unwrap();
    assert_eq!(p.completed_match.team1_score, Some(1));
    assert_eq!(p.completed_match.team2_score, Some(2));
    assert_eq!(p.completed_match.status, MatchStatus::Completed);
}

#[test]
fn partial_score_needs_both_teams() {
    let e = Event::start(TournamentFormat::SingleElimination, 4);
    let final_match = e.round(2)[0].clone();
    assert_eq!(
        record_partial_score(&final_match, Some(7), None),
        Err(TournamentError::MatchNotReady(final_match.id))
    );
}

#[test]
fn partial_score_on_completed_match_is_rejected() {
    let mut e = Event::start(TournamentFormat::RoundRobin, 2);
    let game = e.matches[0].clone();
    e.resolve(&game, e.team(0));
    assert!(matches!(
        record_partial_score(&e.matches[0], Some(5), Some(5)),
        Err(TournamentError::MatchAlreadyCompleted(_))
    ));
}
