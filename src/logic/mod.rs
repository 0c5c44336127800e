//! Tournament business logic: bracket generation, match progression, setup.

mod match_update;
mod progression;
mod round_robin;
mod setup;
mod single_elimination;
mod standings;
mod swiss;

pub use match_update::{submit_match_update, MatchUpdate, MatchUpdateOutcome};
pub use progression::{record_partial_score, resolve_match_completion, MatchProgression, MatchResult};
pub use round_robin::generate_round_robin_bracket;
pub use setup::{
    create_tournament_bracket, generate_initial_matches, parse_team_names_csv, remove_team,
    Bracket, Seeding,
};
pub use single_elimination::{generate_single_elimination_bracket, total_rounds};
pub use standings::standings;
pub use swiss::{count_rematches, generate_swiss_system_round};
