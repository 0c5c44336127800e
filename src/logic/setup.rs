//! Setup phase: register teams and build the initial bracket (Registration -> InProgress).

use crate::logic::round_robin::generate_round_robin_bracket;
use crate::logic::single_elimination::generate_single_elimination_bracket;
use crate::logic::swiss::generate_swiss_system_round;
use crate::models::{
    GameMatch, Team, TeamId, Tournament, TournamentError, TournamentFormat, TournamentStatus,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How registered teams are ordered before pairing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seeding {
    /// Registration order decides the pairings.
    #[default]
    AsEntered,
    Shuffled,
}

/// Teams and initial matches produced at tournament creation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Bracket {
    pub teams: Vec<Team>,
    pub matches: Vec<GameMatch>,
}

/// Create teams from `team_names` and generate the first matches for the tournament's format.
///
/// Names are trimmed and must be unique (case-insensitive). Needs at least 2 teams.
/// On success the tournament is `InProgress` at round 1.
pub fn create_tournament_bracket<S: AsRef<str>>(
    tournament: &mut Tournament,
    team_names: &[S],
    seeding: Seeding,
) -> Result<Bracket, TournamentError> {
    if tournament.status != TournamentStatus::Registration {
        return Err(TournamentError::BracketAlreadyCreated);
    }

    let mut teams: Vec<Team> = Vec::with_capacity(team_names.len());
    for name in team_names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        if teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        teams.push(Team::new(tournament.id, name));
    }
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    if seeding == Seeding::Shuffled {
        teams.shuffle(&mut rand::thread_rng());
    }

    let matches = generate_initial_matches(tournament, &teams);
    tournament.status = TournamentStatus::InProgress;
    tournament.current_round = 1;
    log::info!(
        "Tournament {} started: {:?}, {} teams, {} matches",
        tournament.id,
        tournament.format,
        teams.len(),
        matches.len()
    );
    Ok(Bracket { teams, matches })
}

/// First matches for the tournament's format: the whole elimination bracket, every
/// round robin pairing, or Swiss round 1.
pub fn generate_initial_matches(tournament: &Tournament, teams: &[Team]) -> Vec<GameMatch> {
    match tournament.format {
        TournamentFormat::SingleElimination => {
            generate_single_elimination_bracket(tournament.id, teams)
        }
        TournamentFormat::RoundRobin => generate_round_robin_bracket(tournament.id, teams),
        TournamentFormat::Swiss => generate_swiss_system_round(tournament.id, teams, 1, &[]),
    }
}

/// Read team names from CSV: first column of each row, blanks skipped.
///
/// The first non-blank row is a header, and skipped, only when it has more than one
/// column and its first column is `name`. A single-column list treats every row as a
/// team, so a team called "Name" survives.
pub fn parse_team_names_csv<R: std::io::Read>(reader: R) -> Result<Vec<String>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut names = Vec::new();
    let mut first_row = true;
    for record in rdr.records() {
        let record = record.map_err(|e| TournamentError::InvalidTeamList(e.to_string()))?;
        let name = match record.get(0) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        let is_header = first_row && record.len() > 1 && name.eq_ignore_ascii_case("name");
        first_row = false;
        if is_header {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Manually eliminate a team. The team stays in the list, flagged as removed, and is
/// left out of later Swiss pairings.
pub fn remove_team(teams: &mut [Team], team_id: TeamId) -> Result<(), TournamentError> {
    teams
        .iter_mut()
        .find(|t| t.id == team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?
        .remove();
    Ok(())
}
