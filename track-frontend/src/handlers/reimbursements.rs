use super::multipart::read_claim_form;
use super::visible_to;
use crate::filters::{ClaimFilter, ClaimQuery};
use crate::models::{ActionResponse, Claim, ClaimKind, CurrentUser};
use crate::services::ReimbursementApproval;
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use track_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    #[serde(default, alias = "chargedTo")]
    pub charged_to: String,
}

pub async fn list_reimbursements(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ClaimQuery>,
) -> Result<Json<Vec<Claim>>, AppError> {
    let filter = ClaimFilter::try_from(query)?;
    let claims = state.claims.refresh(ClaimKind::Reimbursement, &user).await?;

    Ok(Json(filter.apply(visible_to(claims, &user))))
}

pub async fn create_reimbursement(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ActionResponse<Claim>>), AppError> {
    let (request, files) = read_claim_form(multipart).await?;
    request.validate()?;
    let building = state.building(&request.building)?;

    let draft = Claim::draft(&request, &user, &building);
    let saved = state
        .claims
        .submit(ClaimKind::Reimbursement, draft, files, &user)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new(saved, "Reimbursement submitted successfully")),
    ))
}

pub async fn approve_reimbursement(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<ActionResponse<ReimbursementApproval>>, AppError> {
    let approval = state
        .transitions
        .approve_reimbursement(&id, &request.charged_to, &user)
        .await?;

    Ok(Json(ActionResponse::new(
        approval,
        "Reimbursement approved and added to expenses",
    )))
}

pub async fn reject_reimbursement(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse<Claim>>, AppError> {
    let rejected = state.transitions.reject_reimbursement(&id, &user).await?;

    Ok(Json(ActionResponse::new(rejected, "Reimbursement rejected")))
}
