use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use swot_core::db::{sync_into, MemoryQuizStore, QuizStore, SqliteQuizStore};
use swot_core::reconcile::MergeReport;
use swot_core::{Quiz, QuizId};

use crate::auth::require_admin_secret;
use crate::config::AppConfig;
use crate::error::AppError;

type SharedStore = Arc<Mutex<Box<dyn QuizStore + Send>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    store: SharedStore,
}

impl AppState {
    /// Build state from config, opening the SQLite store when a database
    /// path is configured and falling back to the in-memory store.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, AppError> {
        let store: Box<dyn QuizStore + Send> = match &config.db_path {
            Some(path) => Box::new(
                SqliteQuizStore::open(path)
                    .map_err(|error| AppError::internal(error.to_string()))?,
            ),
            None => Box::new(MemoryQuizStore::new()),
        };
        Ok(Self {
            config,
            store: Arc::new(Mutex::new(store)),
        })
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, Box<dyn QuizStore + Send>>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::internal("quiz store lock poisoned"))
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest(
            "/v1",
            Router::new()
                .route("/quizzes", get(list_quizzes).post(create_quiz))
                .route(
                    "/quizzes/{id}",
                    get(get_quiz).put(update_quiz).delete(delete_quiz),
                )
                .route("/sync", post(sync_quizzes)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Vec<Quiz>>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(store.list()?))
}

async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, AppError> {
    let id = parse_quiz_id(&id)?;
    let store = state.lock_store()?;
    let quiz = store
        .get(&id)?
        .ok_or_else(|| AppError::not_found(id.to_string()))?;
    Ok(Json(quiz))
}

async fn create_quiz(
    State(state): State<AppState>,
    Json(mut quiz): Json<Quiz>,
) -> Result<(StatusCode, Json<Quiz>), AppError> {
    quiz.validate()?;

    if quiz.id.is_nil() {
        quiz.id = QuizId::new();
    }
    let now = Utc::now().timestamp_millis();
    quiz.version = 1;
    if quiz.created_at == 0 {
        quiz.created_at = now;
    }
    quiz.updated_at = now;

    let mut store = state.lock_store()?;
    if store.get(&quiz.id)?.is_some() {
        return Err(AppError::bad_request(format!(
            "quiz {} already exists; use PUT to update it",
            quiz.id
        )));
    }
    store.upsert(&quiz)?;

    tracing::info!(id = %quiz.id, title = %quiz.title, "created quiz");
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Quiz>,
) -> Result<Json<Quiz>, AppError> {
    let id = parse_quiz_id(&id)?;
    body.validate()?;

    let mut store = state.lock_store()?;
    let existing = store
        .get(&id)?
        .ok_or_else(|| AppError::not_found(id.to_string()))?;

    // The update path bumps the stored version by exactly 1; the body's
    // own counter is ignored here (sync is the endpoint that adopts it).
    let mut updated = body;
    updated.id = id;
    updated.created_at = existing.created_at;
    updated.version = existing.version;
    updated.touch();

    store.upsert(&updated)?;
    Ok(Json(updated))
}

async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    require_admin_secret(&headers, &state.config.admin_secret)?;

    let id = parse_quiz_id(&id)?;
    let mut store = state.lock_store()?;
    store.delete(&id)?;

    tracing::info!(%id, "deleted quiz");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct SyncResponse {
    quizzes: Vec<Quiz>,
    report: MergeReport,
}

async fn sync_quizzes(
    State(state): State<AppState>,
    Json(incoming): Json<Vec<Quiz>>,
) -> Result<Json<SyncResponse>, AppError> {
    let mut store = state.lock_store()?;
    let (quizzes, report) = sync_into(&mut **store, incoming)?;

    tracing::info!(
        added = report.added.len(),
        updated = report.updated.len(),
        skipped_stale = report.skipped_stale.len(),
        rejected = report.rejected.len(),
        "sync merged incoming collection"
    );
    Ok(Json(SyncResponse { quizzes, report }))
}

fn parse_quiz_id(raw: &str) -> Result<QuizId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid quiz id")))
}
