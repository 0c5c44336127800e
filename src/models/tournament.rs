//! Tournament context, format, status and errors.

use crate::models::game::MatchId;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Swiss round count used when a tournament does not set one.
pub const DEFAULT_SWISS_ROUNDS: u32 = 5;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Need at least 2 teams to build a bracket.
    NotEnoughTeams,
    /// Bracket was already generated for this tournament.
    BracketAlreadyCreated,
    /// Team names must be non-empty.
    EmptyTeamName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// Team not found in this tournament.
    TeamNotFound(TeamId),
    /// Match not found in this tournament.
    MatchNotFound(MatchId),
    /// Match belongs to another tournament.
    WrongTournament(MatchId),
    /// The match was already completed; resolving it again would double-count standings.
    MatchAlreadyCompleted(MatchId),
    /// A team slot is still empty (waiting for a feeder match).
    MatchNotReady(MatchId),
    /// Winner is not one of the match participants.
    InvalidWinner { match_id: MatchId, winner_id: TeamId },
    /// Later elimination rounds exist but the match fed by this one is missing.
    MissingNextRoundMatch { round: u32, index: usize },
    /// The next-round slot is already held by a different team.
    NextRoundSlotTaken { match_id: MatchId, team_id: TeamId },
    /// Team list could not be read.
    InvalidTeamList(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to create a bracket"),
            TournamentError::BracketAlreadyCreated => {
                write!(f, "Tournament bracket was already created")
            }
            TournamentError::EmptyTeamName => write!(f, "Team name must not be empty"),
            TournamentError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::WrongTournament(_) => {
                write!(f, "Match does not belong to this tournament")
            }
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Match is already completed"),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match is still waiting for an opponent")
            }
            TournamentError::InvalidWinner { .. } => {
                write!(f, "Winner must be one of the teams in the match")
            }
            TournamentError::MissingNextRoundMatch { round, index } => {
                write!(f, "Bracket has no match {} in round {}", index, round)
            }
            TournamentError::NextRoundSlotTaken { .. } => {
                write!(f, "Next round slot is already taken by another team")
            }
            TournamentError::InvalidTeamList(msg) => write!(f, "Invalid team list: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Bracket format, chosen at creation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    SingleElimination,
    RoundRobin,
    Swiss,
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registration open; no bracket yet.
    #[default]
    Registration,
    InProgress,
    Completed,
}

/// Tournament context handed to the bracket logic. Teams and matches live beside it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    /// Only advanced for Swiss.
    pub current_round: u32,
    /// Target Swiss round count; `None` means [`DEFAULT_SWISS_ROUNDS`].
    pub swiss_rounds: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Registration with no bracket.
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            status: TournamentStatus::Registration,
            current_round: 1,
            swiss_rounds: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_swiss_rounds(mut self, rounds: u32) -> Self {
        self.swiss_rounds = Some(rounds);
        self
    }

    pub fn swiss_round_target(&self) -> u32 {
        self.swiss_rounds.unwrap_or(DEFAULT_SWISS_ROUNDS)
    }
}
