use axum::Json;
use axum::extract::{FromRequest, Path, Request, State};
use axum::{Router, http::StatusCode, routing::get};
use serde::de::DeserializeOwned;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Course, CoursePayload};
use crate::state::AppState;
use crate::validation::validate;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .with_state(state)
}

/// `axum::Json` with the rejection mapped into the shared error body. Serde's
/// message for an invalid enum literal names the offending value and the
/// accepted set, which is exactly what clients get on a decode failure.
struct AppJson<T>(T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

// Ids come in as raw path segments; anything that does not parse is treated
// the same as an id that is not in the store.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let id = parse_id(&id)?;
    let course = repository::find_course(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

async fn create_course(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CoursePayload>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    validate(&payload).map_err(AppError::Validation)?;
    let course = repository::insert_course(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CoursePayload>,
) -> Result<StatusCode, AppError> {
    validate(&payload).map_err(AppError::Validation)?;
    let id = parse_id(&id)?;
    let updated = repository::update_course(&state.db, id, payload).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Ok(id) = id.parse::<i64>() {
        repository::delete_course(&state.db, id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
