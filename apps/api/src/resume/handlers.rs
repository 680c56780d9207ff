//! Axum route handlers for the resume section APIs.
//!
//! All routes require a bearer token. Rows are addressed by id; ownership
//! is not checked against the token subject.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::extractor::Authenticated;
use crate::errors::AppError;
use crate::models::resume::{
    PersonalInfoFields, PersonalInfoRow, SummaryRow, WorkExperienceFields, WorkExperienceRow,
};
use crate::state::AppState;
use crate::validation;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatePersonalInfoRequest {
    pub account_id: i64,
    #[serde(flatten)]
    pub info: PersonalInfoFields,
}

#[derive(Debug, Deserialize)]
pub struct CreateSummaryRequest {
    pub account_id: i64,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSummaryRequest {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkExperienceRequest {
    pub account_id: i64,
    #[serde(flatten)]
    pub experience: WorkExperienceFields,
}

#[derive(Debug, Deserialize)]
pub struct AccountIdQuery {
    pub account_id: i64,
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/personal-info
pub async fn handle_create_personal_info(
    State(state): State<AppState>,
    _auth: Authenticated,
    payload: Result<Json<CreatePersonalInfoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PersonalInfoRow>), AppError> {
    let Json(req) = payload?;
    validation::positive_id("account_id", req.account_id)?;
    let fields = validation::personal_info(req.info)?;

    let row = state.store.create_personal_info(req.account_id, &fields).await?;
    info!("Created personal info {} for account {}", row.id, row.account_id);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/personal-info/:id
pub async fn handle_get_personal_info(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PersonalInfoRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    Ok(Json(state.store.get_personal_info(id).await?))
}

/// PUT /api/v1/personal-info/:id
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PersonalInfoFields>, JsonRejection>,
) -> Result<Json<PersonalInfoRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    let Json(fields) = payload?;
    let fields = validation::personal_info(fields)?;
    Ok(Json(state.store.update_personal_info(id, &fields).await?))
}

/// DELETE /api/v1/personal-info/:id
pub async fn handle_delete_personal_info(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    state.store.delete_personal_info(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/summaries
pub async fn handle_create_summary(
    State(state): State<AppState>,
    _auth: Authenticated,
    payload: Result<Json<CreateSummaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SummaryRow>), AppError> {
    let Json(req) = payload?;
    validation::positive_id("account_id", req.account_id)?;
    validation::summary(&req.summary)?;

    let row = state.store.create_summary(req.account_id, &req.summary).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/summaries/:id
pub async fn handle_get_summary(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SummaryRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    Ok(Json(state.store.get_summary(id).await?))
}

/// PUT /api/v1/summaries/:id
pub async fn handle_update_summary(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateSummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    let Json(req) = payload?;
    validation::summary(&req.summary)?;
    Ok(Json(state.store.update_summary(id, &req.summary).await?))
}

/// DELETE /api/v1/summaries/:id
pub async fn handle_delete_summary(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    state.store.delete_summary(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/work-experiences
pub async fn handle_create_work_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    payload: Result<Json<CreateWorkExperienceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkExperienceRow>), AppError> {
    let Json(req) = payload?;
    validation::positive_id("account_id", req.account_id)?;
    validation::work_experience(&req.experience)?;

    let row = state
        .store
        .create_work_experience(req.account_id, &req.experience)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/work-experiences?account_id=N
pub async fn handle_list_work_experiences(
    State(state): State<AppState>,
    _auth: Authenticated,
    query: Result<Query<AccountIdQuery>, QueryRejection>,
) -> Result<Json<Vec<WorkExperienceRow>>, AppError> {
    let Query(params) = query?;
    validation::positive_id("account_id", params.account_id)?;
    Ok(Json(
        state.store.list_work_experiences(params.account_id).await?,
    ))
}

/// GET /api/v1/work-experiences/:id
pub async fn handle_get_work_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    Ok(Json(state.store.get_work_experience(id).await?))
}

/// PUT /api/v1/work-experiences/:id
pub async fn handle_update_work_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<WorkExperienceFields>, JsonRejection>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    let Json(fields) = payload?;
    validation::work_experience(&fields)?;
    Ok(Json(state.store.update_work_experience(id, &fields).await?))
}

/// DELETE /api/v1/work-experiences/:id
pub async fn handle_delete_work_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    validation::positive_id("id", id)?;
    state.store.delete_work_experience(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
