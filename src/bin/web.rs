//! JSON API over the tournament engines: group stages and knockout brackets.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use joust::{
    groups_by_size, shuffled_groups_by_size, GoalScore, JoustError, KoNode, Phase, PhaseId,
    RankGroup, Round, Scheduler, Scoring, Standing, Tournament, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

type GoalTournament = Tournament<String, GoalScore, i64>;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: GoalTournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Either explicit `groups`, or `participants` split by `group_size`.
#[derive(Deserialize)]
struct CreateTournamentBody {
    groups: Option<Vec<Vec<String>>>,
    participants: Option<Vec<String>>,
    group_size: Option<usize>,
    #[serde(default)]
    shuffle: bool,
    #[serde(default)]
    extra_group: bool,
    #[serde(default)]
    scheduler: Scheduler,
    #[serde(default)]
    scoring: Scoring<i64>,
}

#[derive(Deserialize)]
struct GroupResultBody {
    team_one: String,
    team_two: String,
    /// "a:b", goals of team_one first.
    score: String,
}

#[derive(Deserialize)]
struct CreateKnockoutBody {
    /// Power of two entries; null for a bye.
    seeds: Vec<Option<String>>,
}

#[derive(Deserialize)]
struct KnockoutResultBody {
    first: usize,
    second: usize,
    score: String,
}

#[derive(Deserialize)]
struct KnockoutAdvanceBody {
    first: usize,
    second: usize,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct PhasePath {
    id: TournamentId,
    phase_id: PhaseId,
}

#[derive(Deserialize)]
struct GroupPath {
    id: TournamentId,
    phase_id: PhaseId,
    group: usize,
}

#[derive(Serialize)]
struct TournamentView<'a> {
    id: TournamentId,
    phases: Vec<PhaseView<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PhaseView<'a> {
    Group {
        id: PhaseId,
        groups: Vec<GroupView<'a>>,
    },
    Knockout {
        id: PhaseId,
        num_teams: usize,
        rows: Vec<Vec<usize>>,
        nodes: &'a [Option<KoNode<String, GoalScore>>],
    },
}

#[derive(Serialize)]
struct GroupView<'a> {
    teams: &'a [String],
    rounds: &'a [Round<String>],
    matches: Vec<MatchView>,
    ranking: Vec<Standing<String, i64>>,
    rank_groups: Vec<RankGroup<String, i64>>,
}

#[derive(Serialize)]
struct MatchView {
    team_one: String,
    team_two: String,
    score: Option<String>,
}

impl<'a> TournamentView<'a> {
    fn of(tournament: &'a GoalTournament) -> Self {
        let phases = tournament
            .phase_ids()
            .iter()
            .filter_map(|&id| tournament.phase(id).ok().map(|phase| (id, phase)))
            .map(|(id, phase)| match &phase.phase {
                Phase::Group(group) => PhaseView::Group {
                    id,
                    groups: group
                        .tables
                        .iter()
                        .zip(&group.rounds)
                        .map(|(table, rounds)| GroupView {
                            teams: table.teams(),
                            rounds,
                            matches: table
                                .schedule()
                                .iter()
                                .map(|pairing| MatchView {
                                    team_one: pairing.first.clone(),
                                    team_two: pairing.second.clone(),
                                    score: table
                                        .result(&pairing.first, &pairing.second)
                                        .map(|r| r.to_string()),
                                })
                                .collect(),
                            ranking: table.sorted_ranking(),
                            rank_groups: table.rank_groups(),
                        })
                        .collect(),
                },
                Phase::Knockout(ko) => PhaseView::Knockout {
                    id,
                    num_teams: ko.tree.num_teams(),
                    rows: ko.tree.rows(),
                    nodes: ko.tree.nodes(),
                },
            })
            .collect();
        Self {
            id: tournament.id,
            phases,
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: JoustError) -> HttpResponse {
    log::warn!("Rejected request: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Looks up a tournament, refreshes its activity time, applies `f` and
/// responds with the updated tournament.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut GoalTournament) -> Result<(), JoustError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::of(&entry.tournament)),
        Err(e) => bad_request(e),
    }
}

fn build_groups(body: &CreateTournamentBody) -> Result<Vec<Vec<String>>, JoustError> {
    if let Some(groups) = &body.groups {
        return Ok(groups.clone());
    }
    let participants = body.participants.as_deref().unwrap_or_default();
    let size = body.group_size.unwrap_or(participants.len());
    let groups = if body.shuffle {
        shuffled_groups_by_size(size, participants, body.extra_group, &mut rand::thread_rng())
    } else {
        groups_by_size(size, participants, body.extra_group)
    };
    if groups.is_empty() {
        return Err(JoustError::InvalidArgument(
            "need groups, or participants and a positive group size".to_string(),
        ));
    }
    Ok(groups)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "joust",
    })
}

/// Create a tournament with one group phase.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let created = build_groups(&body)
        .and_then(|groups| GoalTournament::round_robin(groups, body.scheduler, body.scoring));
    let (tournament, _) = match created {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {}", id);
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(TournamentView::of(&entry.tournament))
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Record a group match result from a score string.
#[put("/api/tournaments/{id}/phases/{phase_id}/groups/{group}/result")]
async fn api_set_group_result(
    state: AppState,
    path: Path<GroupPath>,
    body: Json<GroupResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.phase_mut(path.phase_id)?.group_mut()?.set_result_from_str(
            path.group,
            &body.team_one,
            &body.team_two,
            &body.score,
        )
    })
}

/// Add a knockout phase.
#[post("/api/tournaments/{id}/knockout")]
async fn api_create_knockout(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<CreateKnockoutBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.add_knockout(body.seeds.clone()).map(|_| ())
    })
}

/// Record a knockout match result between two sibling slots.
#[put("/api/tournaments/{id}/phases/{phase_id}/knockout/result")]
async fn api_set_knockout_result(
    state: AppState,
    path: Path<PhasePath>,
    body: Json<KnockoutResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let score: GoalScore = body.score.parse()?;
        t.phase_mut(path.phase_id)?
            .knockout_mut()?
            .tree
            .set_match(body.first, body.second, score)
    })
}

/// Move the winner of a knockout match into the parent slot.
#[post("/api/tournaments/{id}/phases/{phase_id}/knockout/advance")]
async fn api_advance_knockout(
    state: AppState,
    path: Path<PhasePath>,
    body: Json<KnockoutAdvanceBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.phase_mut(path.phase_id)?
            .knockout_mut()?
            .tree
            .advance(body.first, body.second)
            .map(|_| ())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_group_result)
            .service(api_create_knockout)
            .service(api_set_knockout_result)
            .service(api_advance_knockout)
    })
    .bind(bind)?
    .run()
    .await
}
