use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use fts_core::{Directive, FullTextIndex, Ledger};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize { 100 }

#[derive(Serialize)]
pub struct SearchResponse<T> {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<T>,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub accounts: usize,
    pub directives: usize,
}

/// Immutable indexes built from one load of the ledger.
pub struct Snapshot {
    pub accounts: FullTextIndex<String>,
    pub directives: FullTextIndex<Directive>,
}

impl Snapshot {
    pub fn load(ledger_path: &Path) -> Result<Self> {
        let ledger = Ledger::from_path(ledger_path)?;
        let accounts = fts_core::search_accounts(&ledger.accounts()).map_payloads(str::to_string);
        let directives = ledger
            .directives
            .into_iter()
            .map(|d| (d.searchable_text(), d))
            .collect();
        Ok(Self { accounts, directives })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub ledger_path: PathBuf,
    /// Replaced wholesale on reload; readers clone the inner `Arc` and never block a rebuild.
    pub snapshot: Arc<RwLock<Arc<Snapshot>>>,
    /// Held across load and swap so reloads land in request order.
    pub reload_lock: Arc<tokio::sync::Mutex<()>>,
    pub admin_token: Option<String>,
}

impl AppState {
    fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }
}

pub fn build_app(ledger_path: String) -> Result<Router> {
    build_app_with_token(ledger_path, std::env::var("ADMIN_TOKEN").ok())
}

pub fn build_app_with_token(ledger_path: String, admin_token: Option<String>) -> Result<Router> {
    let ledger_path = PathBuf::from(ledger_path);
    let snapshot = Snapshot::load(&ledger_path)?;
    tracing::info!(
        accounts = snapshot.accounts.len(),
        directives = snapshot.directives.len(),
        "search indexes ready"
    );
    let app_state = AppState {
        ledger_path,
        snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
        reload_lock: Arc::new(tokio::sync::Mutex::new(())),
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search/accounts", get(search_accounts_handler))
        .route("/search/directives", get(search_directives_handler))
        .route("/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_accounts_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse<String>> {
    let start = std::time::Instant::now();
    let snapshot = state.current();
    let hits = snapshot.accounts.search(&params.q);
    let total_hits = hits.len();
    let results = hits.into_iter().take(clamp_limit(params.limit)).cloned().collect();
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn search_directives_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse<Directive>> {
    let start = std::time::Instant::now();
    let snapshot = state.current();
    let hits = snapshot.directives.search(&params.q);
    let total_hits = hits.len();
    let results = hits.into_iter().take(clamp_limit(params.limit)).cloned().collect();
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, "directive search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, 1000)
}

async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let _guard = state.reload_lock.lock().await;
    let path = state.ledger_path.clone();
    let loaded = tokio::task::spawn_blocking(move || Snapshot::load(&path))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let snapshot = match loaded {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "reload failed; keeping previous indexes");
            return Err((StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")));
        }
    };
    let resp = ReloadResponse { accounts: snapshot.accounts.len(), directives: snapshot.directives.len() };
    *state.snapshot.write() = Arc::new(snapshot);
    tracing::info!(accounts = resp.accounts, directives = resp.directives, "indexes reloaded");
    Ok(Json(resp))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
