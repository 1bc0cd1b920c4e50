//! Single binary web server: season fixture generation, rounds and knockout stages via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DEFAULT_TWO_LEGGED (true/false), RUST_LOG.

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use league_fixtures::{
    advancing_teams, calculate_group_standings, read_roster, resolve_knockout_stages, Competitor,
    FixtureStatus, KnockoutConfig, KnockoutSettings, Leg, RoundAction, RoundDeadlines, ScheduleError, ScheduleStore,
};
use serde::Deserialize;
use std::sync::RwLock;

/// In-memory schedules for all seasons. Generation holds the write lock across the
/// "fixtures already exist" check and the insert.
type AppState = Data<RwLock<ScheduleStore>>;

/// Server settings read from the environment at startup.
#[derive(Clone, Debug)]
struct Config {
    host: String,
    port: u16,
    /// Used when a generate request does not say whether the schedule is two-legged.
    default_two_legged: bool,
}

impl Config {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            default_two_legged: std::env::var("DEFAULT_TWO_LEGGED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct GenerateFixturesBody {
    competitors: Vec<Competitor>,
    two_legged: Option<bool>,
}

#[derive(Deserialize)]
struct ImportQuery {
    two_legged: Option<bool>,
}

#[derive(Deserialize)]
struct AdvancingQuery {
    per_group: usize,
}

#[derive(Deserialize)]
struct GroupStageBody {
    competitors: Vec<Competitor>,
    number_of_groups: u32,
    teams_per_group: u32,
}

#[derive(Deserialize)]
struct ResultBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct StatusBody {
    status: FixtureStatus,
}

/// Path segment: season id (e.g. /api/seasons/{id})
#[derive(Deserialize)]
struct SeasonPath {
    id: String,
}

/// Path segments: season id and fixture id
#[derive(Deserialize)]
struct FixturePath {
    id: String,
    fixture_id: String,
}

#[derive(Deserialize)]
struct CompetitorPath {
    id: String,
    competitor_id: String,
}

/// Path segments: season id, round number and leg (e.g. /api/seasons/{id}/rounds/3/first)
#[derive(Deserialize)]
struct RoundPath {
    id: String,
    round_number: u32,
    leg: Leg,
}

#[derive(Deserialize)]
struct RoundActionPath {
    id: String,
    round_number: u32,
    leg: Leg,
    action: RoundAction,
}

/// Map a scheduling error to a JSON error response with a matching status code.
fn error_response(e: ScheduleError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ScheduleError::DuplicateScheduleConflict(_) | ScheduleError::RoundAlreadyActive { .. } => {
            HttpResponse::Conflict().json(body)
        }
        ScheduleError::SeasonNotFound(_)
        | ScheduleError::FixtureNotFound(_)
        | ScheduleError::RoundNotFound { .. } => HttpResponse::NotFound().json(body),
        ScheduleError::InvalidInput(_) | ScheduleError::InvalidConfig(_) | ScheduleError::Csv(_) => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-fixtures",
    })
}

/// Generate the season's round-robin fixtures (409 if fixtures already exist).
#[post("/api/seasons/{id}/fixtures")]
async fn api_generate_fixtures(
    state: AppState,
    config: Data<Config>,
    path: Path<SeasonPath>,
    body: Json<GenerateFixturesBody>,
) -> HttpResponse {
    let two_legged = body.two_legged.unwrap_or(config.default_two_legged);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.generate_round_robin(&path.id, &body.competitors, two_legged) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(e),
    }
}

/// Generate round-robin fixtures from a CSV roster body (`id,name` header).
#[post("/api/seasons/{id}/fixtures/import")]
async fn api_import_fixtures(
    state: AppState,
    config: Data<Config>,
    path: Path<SeasonPath>,
    query: Query<ImportQuery>,
    body: String,
) -> HttpResponse {
    let competitors = match read_roster(body.as_bytes()) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    log::info!("Imported {} competitors for season {}", competitors.len(), path.id);
    let two_legged = query.two_legged.unwrap_or(config.default_two_legged);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.generate_round_robin(&path.id, &competitors, two_legged) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(e),
    }
}

/// Draw groups and generate group-stage fixtures.
#[post("/api/seasons/{id}/group-fixtures")]
async fn api_generate_group_fixtures(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<GroupStageBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut rng = rand::thread_rng();
    match g.generate_group_stage(
        &path.id,
        &body.competitors,
        body.number_of_groups,
        body.teams_per_group,
        &mut rng,
    ) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(e),
    }
}

/// Group tables computed from completed group-stage fixtures.
#[get("/api/seasons/{id}/standings")]
async fn api_group_standings(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.season(&path.id) {
        Ok(schedule) => HttpResponse::Ok().json(calculate_group_standings(&schedule.fixtures)),
        Err(e) => error_response(e),
    }
}

/// Top `per_group` teams of every group, ready to seed the knockout stage.
#[get("/api/seasons/{id}/standings/advancing")]
async fn api_advancing_teams(
    state: AppState,
    path: Path<SeasonPath>,
    query: Query<AdvancingQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.season(&path.id) {
        Ok(schedule) => {
            let standings = calculate_group_standings(&schedule.fixtures);
            HttpResponse::Ok().json(advancing_teams(&standings, query.per_group))
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/seasons/{id}/fixtures")]
async fn api_get_fixtures(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.season(&path.id) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(e),
    }
}

/// Delete all fixtures and round records of a season so it can be regenerated.
#[delete("/api/seasons/{id}/fixtures")]
async fn api_delete_fixtures(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let deleted = g.delete_fixtures(&path.id);
    HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted }))
}

/// Rounds with completion counts, deadlines and status.
#[get("/api/seasons/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.season(&path.id) {
        Ok(schedule) => HttpResponse::Ok().json(schedule.round_overviews()),
        Err(e) => error_response(e),
    }
}

#[get("/api/seasons/{id}/competitors/{competitor_id}/fixtures")]
async fn api_competitor_fixtures(state: AppState, path: Path<CompetitorPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.fixtures_for_competitor(&path.id, &path.competitor_id) {
        Ok(fixtures) => HttpResponse::Ok().json(fixtures),
        Err(e) => error_response(e),
    }
}

/// Enter a fixture's score; the fixture becomes completed.
#[put("/api/seasons/{id}/fixtures/{fixture_id}/result")]
async fn api_set_result(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g
        .season_mut(&path.id)
        .and_then(|s| s.record_result(&path.fixture_id, body.home_score, body.away_score));
    match result {
        Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({ "result": outcome })),
        Err(e) => error_response(e),
    }
}

#[put("/api/seasons/{id}/fixtures/{fixture_id}/status")]
async fn api_set_status(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<StatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g
        .season_mut(&path.id)
        .and_then(|s| s.set_fixture_status(&path.fixture_id, body.status));
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[put("/api/seasons/{id}/rounds/{round_number}/{leg}/deadlines")]
async fn api_set_round_deadlines(
    state: AppState,
    path: Path<RoundPath>,
    body: Json<RoundDeadlines>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.season_mut(&path.id).and_then(|s| {
        s.update_round_deadlines(path.round_number, path.leg, body.into_inner())?;
        s.round_deadlines(path.round_number, path.leg).cloned()
    });
    match result {
        Ok(deadlines) => HttpResponse::Ok().json(deadlines),
        Err(e) => error_response(e),
    }
}

/// Start, pause, resume, complete or restart a round (409 if another round is active).
#[post("/api/seasons/{id}/rounds/{round_number}/{leg}/{action}")]
async fn api_round_action(state: AppState, path: Path<RoundActionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g
        .season_mut(&path.id)
        .and_then(|s| s.apply_round_action(path.round_number, path.leg, path.action).cloned());
    match result {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(e),
    }
}

/// Elimination stages for a knockout configuration (for the reward form).
#[post("/api/knockout/stages")]
async fn api_knockout_stages(body: Json<KnockoutSettings>) -> HttpResponse {
    match KnockoutConfig::try_from(body.into_inner()) {
        Ok(config) => HttpResponse::Ok().json(resolve_knockout_stages(&config)),
        Err(e) => error_response(e),
    }
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_import_fixtures)
        .service(api_generate_fixtures)
        .service(api_generate_group_fixtures)
        .service(api_get_fixtures)
        .service(api_delete_fixtures)
        .service(api_get_rounds)
        .service(api_group_standings)
        .service(api_advancing_teams)
        .service(api_competitor_fixtures)
        .service(api_set_result)
        .service(api_set_status)
        .service(api_set_round_deadlines)
        .service(api_round_action)
        .service(api_knockout_stages);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!(
        "Starting server at http://{}:{} (default two-legged: {})",
        config.host,
        config.port,
        config.default_two_legged
    );
    let bind = (config.host.clone(), config.port);

    let state = Data::new(RwLock::new(ScheduleStore::new()));
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn test_config() -> Data<Config> {
        Data::new(Config {
            host: default_host(),
            port: default_port(),
            default_two_legged: true,
        })
    }

    fn four_teams() -> serde_json::Value {
        serde_json::json!({
            "competitors": [
                { "id": "t1", "name": "Team 1" },
                { "id": "t2", "name": "Team 2" },
                { "id": "t3", "name": "Team 3" },
                { "id": "t4", "name": "Team 4" }
            ],
            "two_legged": false
        })
    }

    #[actix_web::test]
    async fn second_generation_is_a_conflict_until_deleted() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(test_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(four_teams())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(four_teams())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(state.read().unwrap().season("s1").unwrap().fixtures.len(), 6);

        let req = test::TestRequest::delete()
            .uri("/api/seasons/s1/fixtures")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], 6);

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(four_teams())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn too_few_competitors_is_bad_request() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_config())
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(serde_json::json!({ "competitors": [{ "id": "t1", "name": "Team 1" }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn csv_import_uses_default_two_legged() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(test_config())
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/s2/fixtures/import")
            .set_payload("id,name\na,Alpha\nb,Beta\nc,Gamma\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let g = state.read().unwrap();
        let schedule = g.season("s2").unwrap();
        assert!(schedule.two_legged);
        assert_eq!(schedule.fixtures.len(), 6);
        assert_eq!(schedule.rounds.len(), 6);
    }

    #[actix_web::test]
    async fn round_actions_allow_one_active_round() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_config())
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(four_teams())
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/rounds/1/first/start")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/rounds/2/first/start")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/rounds/9/first/start")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn rounds_endpoint_reports_active_round() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_config())
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/fixtures")
            .set_json(four_teams())
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/s1/rounds/2/first/start")
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/seasons/s1/rounds")
            .to_request();
        let rounds: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let rounds = rounds.as_array().unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[1]["round_number"], 2);
        assert_eq!(rounds[1]["status"], "active");
        assert_eq!(rounds[1]["is_active"], true);
        assert_eq!(rounds[0]["is_active"], false);
        assert_eq!(rounds[1]["total_matches"], 2);
        assert_eq!(rounds[1]["deadlines"]["result_entry_day_offset"], 2);
    }

    #[actix_web::test]
    async fn standings_follow_entered_results() {
        let state = Data::new(RwLock::new(ScheduleStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(test_config())
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/seasons/g/group-fixtures")
            .set_json(serde_json::json!({
                "competitors": [
                    { "id": "t1", "name": "Team 1" },
                    { "id": "t2", "name": "Team 2" },
                    { "id": "t3", "name": "Team 3" },
                    { "id": "t4", "name": "Team 4" }
                ],
                "number_of_groups": 2,
                "teams_per_group": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let (fixture_id, away_id) = {
            let g = state.read().unwrap();
            let f = g.season("g").unwrap().fixtures[0].clone();
            (f.id, f.away_competitor_id)
        };
        let req = test::TestRequest::put()
            .uri(&format!("/api/seasons/g/fixtures/{fixture_id}/result"))
            .set_json(serde_json::json!({ "home_score": 0, "away_score": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/seasons/g/standings")
            .to_request();
        let standings: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(standings["A"][0]["competitor_id"], away_id.as_str());
        assert_eq!(standings["A"][0]["points"], 3);
        assert_eq!(standings["B"][0]["played"], 0);

        let req = test::TestRequest::get()
            .uri("/api/seasons/g/standings/advancing?per_group=1")
            .to_request();
        let advancing: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let advancing = advancing.as_array().unwrap();
        assert_eq!(advancing.len(), 2);
        assert_eq!(advancing[0]["competitor_id"], away_id.as_str());
        assert_eq!(advancing[1]["group"], "B");
    }

    #[actix_web::test]
    async fn knockout_stages_endpoint_validates_config() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/knockout/stages")
            .set_json(serde_json::json!({
                "has_knockout_stage": true,
                "has_group_stage": true,
                "number_of_groups": 4,
                "teams_advancing_per_group": 2
            }))
            .to_request();
        let stages: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stages.as_array().unwrap().len(), 4);
        assert_eq!(stages[0]["key"], "quarter_final_loser");

        let req = test::TestRequest::post()
            .uri("/api/knockout/stages")
            .set_json(serde_json::json!({
                "has_knockout_stage": true,
                "playoff_teams": 5,
                "direct_semifinal_teams": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
