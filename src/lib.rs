//! Community tournament web app: library with models and bracket logic.

pub mod config;
pub mod logic;
pub mod models;

pub use logic::{
    count_rematches, create_tournament_bracket, generate_initial_matches,
    generate_round_robin_bracket, generate_single_elimination_bracket,
    generate_swiss_system_round, parse_team_names_csv, record_partial_score, remove_team,
    resolve_match_completion, standings, submit_match_update, total_rounds, Bracket,
    MatchProgression, MatchResult, MatchUpdate, MatchUpdateOutcome, Seeding,
};
pub use models::{
    GameMatch, MatchId, MatchStatus, Team, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentStatus, DEFAULT_SWISS_ROUNDS, POINTS_PER_WIN,
};
