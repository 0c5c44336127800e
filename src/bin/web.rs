//! Single binary web server: REST API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (cleanup threshold, default 12).

use actix_web::{
    get, patch, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use community_tournament_web::config::ServerConfig;
use community_tournament_web::{
    create_tournament_bracket, parse_team_names_csv, remove_team, standings,
    submit_match_update, GameMatch, MatchId, MatchUpdate, Seeding, Team, TeamId, Tournament,
    TournamentError, TournamentFormat, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament, its teams and matches, last activity (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    teams: Vec<Team>,
    matches: Vec<GameMatch>,
    last_activity: Instant,
}

impl TournamentEntry {
    fn view(&self) -> TournamentView<'_> {
        TournamentView {
            tournament: &self.tournament,
            teams: &self.teams,
            matches: &self.matches,
        }
    }
}

/// In-memory state: tournaments by ID. One write lock covers a whole match update,
/// so a resolved match and all of its mutations land together.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a Tournament,
    teams: &'a [Team],
    matches: &'a [GameMatch],
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    format: TournamentFormat,
    swiss_rounds: Option<u32>,
    /// Bracket is generated right away when teams are given.
    #[serde(default)]
    teams: Vec<String>,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ImportQuery {
    name: String,
    #[serde(default)]
    format: TournamentFormat,
    swiss_rounds: Option<u32>,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    teams: Vec<String>,
    #[serde(default)]
    shuffle: bool,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

fn seeding(shuffle: bool) -> Seeding {
    if shuffle {
        Seeding::Shuffled
    } else {
        Seeding::AsEntered
    }
}

fn error_response(e: &TournamentError) -> HttpResponse {
    log::warn!("Rejected request: {}", e);
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TeamNotFound(_) | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::MatchAlreadyCompleted(_) | TournamentError::BracketAlreadyCreated => {
            HttpResponse::Conflict().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Build a tournament entry; the bracket is generated when `team_names` is non-empty.
fn new_entry(
    mut tournament: Tournament,
    team_names: &[String],
    seeding: Seeding,
) -> Result<TournamentEntry, TournamentError> {
    let (teams, matches) = if team_names.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let bracket = create_tournament_bracket(&mut tournament, team_names, seeding)?;
        (bracket.teams, bracket.matches)
    };
    Ok(TournamentEntry {
        tournament,
        teams,
        matches,
        last_activity: Instant::now(),
    })
}

fn insert_entry(state: &AppState, entry: TournamentEntry) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = entry.tournament.id;
    let response = HttpResponse::Ok().json(entry.view());
    g.insert(id, entry);
    response
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "community-tournament-web",
    })
}

/// Create a tournament, optionally with its team list (which starts it).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut tournament = Tournament::new(body.name.trim(), body.format);
    tournament.swiss_rounds = body.swiss_rounds;
    match new_entry(tournament, &body.teams, seeding(body.shuffle)) {
        Ok(entry) => insert_entry(&state, entry),
        Err(e) => error_response(&e),
    }
}

/// Create and start a tournament from a CSV team list in the request body.
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, query: Query<ImportQuery>, body: String) -> HttpResponse {
    let names = match parse_team_names_csv(body.as_bytes()) {
        Ok(names) => names,
        Err(e) => return error_response(&e),
    };
    if names.is_empty() {
        return error_response(&TournamentError::NotEnoughTeams);
    }
    let mut tournament = Tournament::new(query.name.trim(), query.format);
    tournament.swiss_rounds = query.swiss_rounds;
    match new_entry(tournament, &names, seeding(query.shuffle)) {
        Ok(entry) => insert_entry(&state, entry),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament with its teams and matches. Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.view())
        }
        None => no_tournament(),
    }
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(standings(&entry.teams)),
        None => no_tournament(),
    }
}

/// Register teams and generate the bracket for a tournament still in registration.
#[post("/api/tournaments/{id}/bracket")]
async fn api_create_bracket(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<CreateBracketBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match create_tournament_bracket(&mut entry.tournament, &body.teams, seeding(body.shuffle)) {
        Ok(bracket) => {
            entry.teams = bracket.teams;
            entry.matches = bracket.matches;
            HttpResponse::Ok().json(entry.view())
        }
        Err(e) => error_response(&e),
    }
}

/// Record a score, or a result when `winner_id` is set. A result runs the resolver and
/// applies standings, bracket advancement and any new Swiss round together.
#[patch("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();

    let update = body.into_inner();
    match submit_match_update(
        &mut entry.tournament,
        &mut entry.matches,
        &mut entry.teams,
        path.match_id,
        &update,
    ) {
        Ok(_) => HttpResponse::Ok().json(entry.view()),
        Err(e) => error_response(&e),
    }
}

/// Manually eliminate a team (flag only; the team keeps its history).
#[post("/api/tournaments/{id}/teams/{team_id}/remove")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match remove_team(&mut entry.teams, path.team_id) {
        Ok(()) => HttpResponse::Ok().json(entry.view()),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive past the threshold
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_import_tournament)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_standings)
            .service(api_create_bracket)
            .service(api_update_match)
            .service(api_remove_team)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
