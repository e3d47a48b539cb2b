// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use roster_domain::{DomainError, MemberSearchFilter, PageRequest, SortKey, TeamJoin};
use roster_persistence::{MemberTeamData, Persistence, PersistenceError};

/// The page size used when a paged request does not specify one.
const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Roster Server - HTTP server for the Roster search service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load the demo dataset (2 teams, 100 members) at startup
    #[arg(long)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for members and teams.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters of an unpaged member search.
#[derive(Debug, Clone, Deserialize)]
struct SearchParams {
    /// Exact user name to match.
    user_name: Option<String>,
    /// Exact team name to match.
    team_name: Option<String>,
    /// Inclusive lower bound on age.
    age_goe: Option<i32>,
    /// Inclusive upper bound on age.
    age_loe: Option<i32>,
}

impl SearchParams {
    /// Carries the raw parameters into a domain filter. Blank strings are
    /// interpreted as absent by the predicate layer, so no cleanup happens
    /// here.
    fn into_filter(self) -> MemberSearchFilter {
        let mut filter: MemberSearchFilter = MemberSearchFilter::new();
        if let Some(user_name) = self.user_name {
            filter = filter.with_user_name(user_name);
        }
        if let Some(team_name) = self.team_name {
            filter = filter.with_team_name(team_name);
        }
        if let Some(age_goe) = self.age_goe {
            filter = filter.with_age_goe(age_goe);
        }
        if let Some(age_loe) = self.age_loe {
            filter = filter.with_age_loe(age_loe);
        }
        filter
    }
}

/// Query parameters of a paged member search.
#[derive(Debug, Clone, Deserialize)]
struct PagedSearchParams {
    /// Exact user name to match.
    user_name: Option<String>,
    /// Exact team name to match.
    team_name: Option<String>,
    /// Inclusive lower bound on age.
    age_goe: Option<i32>,
    /// Inclusive upper bound on age.
    age_loe: Option<i32>,
    /// Zero-based row offset (default 0).
    offset: Option<u64>,
    /// Maximum rows per page (default 20).
    limit: Option<u32>,
    /// Comma-separated sort keys, e.g. `age:desc,user_name`.
    sort: Option<String>,
}

/// Response body of a paged member search.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PagedMembersResponse {
    /// The rows of this page.
    content: Vec<MemberTeamData>,
    /// The zero-based row offset of this page.
    offset: u64,
    /// The requested page size.
    limit: u32,
    /// The total number of rows matching the filter.
    total: u64,
}

/// Request body for creating a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTeamRequest {
    /// The team name (must be unique).
    team_name: String,
}

/// Request body for creating a member.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateMemberRequest {
    /// The member's user name.
    user_name: String,
    /// The member's age.
    age: i32,
    /// The member's team, if any.
    team_id: Option<i64>,
}

/// Response body for creation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreatedResponse {
    /// The identifier of the created row.
    id: i64,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::InvalidInput(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            PersistenceError::DuplicateTeam(_) => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            PersistenceError::TeamNotFound(_) | PersistenceError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            _ => {
                error!(error = %err, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Persistence error: {err}"),
                }
            }
        }
    }
}

/// Parses the comma-separated `sort` query parameter into sort keys.
fn parse_sort(sort: Option<&str>) -> Result<Vec<SortKey>, HttpError> {
    sort.map(str::trim)
        .filter(|text| !text.is_empty())
        .map_or_else(
            || Ok(Vec::new()),
            |text| {
                text.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(|key| SortKey::from_str(key).map_err(HttpError::from))
                    .collect()
            },
        )
}

/// Handler for GET `/v1/members` endpoint.
///
/// Unpaged member search; intended for small, bounded result sets.
async fn handle_search_members(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MemberTeamData>>, HttpError> {
    info!("Handling unpaged member search request");

    let filter: MemberSearchFilter = params.into_filter();

    let mut persistence = app_state.persistence.lock().await;
    let rows: Vec<MemberTeamData> =
        persistence.search_members(&filter, TeamJoin::left_outer())?;
    drop(persistence);

    Ok(Json(rows))
}

/// Handler for GET `/v2/members` endpoint.
///
/// Paged member search with an optimized total count.
async fn handle_search_members_page(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<PagedSearchParams>,
) -> Result<Json<PagedMembersResponse>, HttpError> {
    info!(
        offset = params.offset,
        limit = params.limit,
        "Handling paged member search request"
    );

    let sort: Vec<SortKey> = parse_sort(params.sort.as_deref())?;
    let page: PageRequest = PageRequest::new(
        params.offset.unwrap_or(0),
        params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        sort,
    )?;

    let filter: MemberSearchFilter = SearchParams {
        user_name: params.user_name,
        team_name: params.team_name,
        age_goe: params.age_goe,
        age_loe: params.age_loe,
    }
    .into_filter();

    let mut persistence = app_state.persistence.lock().await;
    let result = persistence.search_members_page(&filter, TeamJoin::left_outer(), &page)?;
    drop(persistence);

    Ok(Json(PagedMembersResponse {
        offset: result.request().offset(),
        limit: result.request().limit(),
        total: result.total(),
        content: result.into_content(),
    }))
}

/// Handler for POST `/v1/teams` endpoint.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<CreatedResponse>, HttpError> {
    info!(team_name = %req.team_name, "Handling create_team request");

    let mut persistence = app_state.persistence.lock().await;
    let team_id: i64 = persistence.register_team(&req.team_name)?;
    drop(persistence);

    Ok(Json(CreatedResponse { id: team_id }))
}

/// Handler for POST `/v1/members` endpoint.
async fn handle_create_member(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Json<CreatedResponse>, HttpError> {
    info!(user_name = %req.user_name, "Handling create_member request");

    let mut persistence = app_state.persistence.lock().await;
    let member_id: i64 = persistence.register_member(&req.user_name, req.age, req.team_id)?;
    drop(persistence);

    Ok(Json(CreatedResponse { id: member_id }))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/members",
            get(handle_search_members).post(handle_create_member),
        )
        .route("/v2/members", get(handle_search_members_page))
        .route("/v1/teams", post(handle_create_team))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Roster Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed {
        info!("Loading demo dataset");
        persistence.seed_demo_data()?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with seeded in-memory persistence.
    ///
    /// Seeds the canonical seven-member fixture: `member1`..`member3`
    /// (ages 10, 20, 30) in `team1`, `member4`..`member7` (ages 40, 50,
    /// 60, 70) in `team2`.
    fn create_seeded_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");

        let team1: i64 = persistence.register_team("team1").unwrap();
        let team2: i64 = persistence.register_team("team2").unwrap();
        for (index, age) in (10..=70).step_by(10).enumerate() {
            let team_id: i64 = if age <= 30 { team1 } else { team2 };
            let user_name: String = format!("member{}", index + 1);
            persistence
                .register_member(&user_name, age, Some(team_id))
                .unwrap();
        }

        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    #[tokio::test]
    async fn test_unpaged_search_filters_by_team() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/members?team_name=team1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: Vec<MemberTeamData> = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.team_name.as_deref() == Some("team1")));
    }

    #[tokio::test]
    async fn test_paged_search_returns_sorted_page_and_total() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v2/members?offset=0&limit=3&sort=age:desc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page: PagedMembersResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(page.total, 7);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 3);
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.content[0].user_name, "member7");
        assert_eq!(page.content[2].user_name, "member5");
    }

    #[tokio::test]
    async fn test_paged_search_combines_filters() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v2/members?team_name=team2&age_goe=30&age_loe=60&limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page: PagedMembersResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(page.total, 3);
        let names: Vec<&str> = page
            .content
            .iter()
            .map(|row| row.user_name.as_str())
            .collect();
        assert!(names.contains(&"member4"));
        assert!(names.contains(&"member5"));
        assert!(names.contains(&"member6"));
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v2/members?sort=height:asc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v2/members?limit=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_team_then_member_is_searchable() {
        let app_state: AppState = create_seeded_app_state();
        let app: Router = build_router(app_state);

        let team_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/teams")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&CreateTeamRequest {
                            team_name: String::from("team9"),
                        })
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(team_response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(team_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created_team: CreatedResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(created_team.id > 0);

        let member_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/members")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&CreateMemberRequest {
                            user_name: String::from("member9"),
                            age: 90,
                            team_id: Some(created_team.id),
                        })
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(member_response.status(), HttpStatusCode::OK);

        let search_response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/members?team_name=team9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body_bytes = axum::body::to_bytes(search_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: Vec<MemberTeamData> = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_name, "member9");
    }

    #[tokio::test]
    async fn test_member_with_unknown_team_is_not_found() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/members")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&CreateMemberRequest {
                            user_name: String::from("member9"),
                            age: 90,
                            team_id: Some(999),
                        })
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_team_is_a_conflict() {
        let app: Router = build_router(create_seeded_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/teams")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&CreateTeamRequest {
                            team_name: String::from("team1"),
                        })
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }
}
