use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::domain::{CandidateId, CandidateProfile, CandidateRecord, CandidateSubmission};
use super::service::CandidateIntakeService;
use crate::error::AppError;

/// Router exposing candidate intake and lookup.
pub fn candidate_router(service: Arc<CandidateIntakeService>) -> Router {
    Router::new()
        .route("/api/v1/candidates", post(create_handler))
        .route("/api/v1/candidates/:candidate_id", get(profile_handler))
        .with_state(service)
}

pub(crate) async fn create_handler(
    State(service): State<Arc<CandidateIntakeService>>,
    Json(submission): Json<CandidateSubmission>,
) -> Result<(StatusCode, Json<CandidateRecord>), AppError> {
    let record = service.add_candidate(submission).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn profile_handler(
    State(service): State<Arc<CandidateIntakeService>>,
    Path(candidate_id): Path<String>,
) -> Result<Json<CandidateProfile>, AppError> {
    let raw_id = candidate_id
        .parse::<u64>()
        .map_err(|_| AppError::InvalidCandidateId(candidate_id))?;

    let profile = service.get_candidate(CandidateId(raw_id)).await?;
    Ok(Json(profile))
}
