use super::multipart::read_claim_form;
use super::visible_to;
use crate::filters::{ClaimFilter, ClaimQuery};
use crate::models::{ActionResponse, Claim, ClaimKind, CurrentUser, NewClaimRequest, StatusChangeRequest};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use track_core::error::AppError;
use validator::Validate;

pub async fn list_expenses(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ClaimQuery>,
) -> Result<Json<Vec<Claim>>, AppError> {
    let filter = ClaimFilter::try_from(query)?;
    let claims = state.claims.refresh(ClaimKind::Expense, &user).await?;

    Ok(Json(filter.apply(visible_to(claims, &user))))
}

pub async fn create_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<NewClaimRequest>,
) -> Result<(StatusCode, Json<ActionResponse<Claim>>), AppError> {
    submit_expense(&state, &user, request, Vec::new()).await
}

pub async fn upload_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ActionResponse<Claim>>), AppError> {
    let (request, files) = read_claim_form(multipart).await?;
    submit_expense(&state, &user, request, files).await
}

async fn submit_expense(
    state: &AppState,
    user: &CurrentUser,
    request: NewClaimRequest,
    files: Vec<crate::services::FileUpload>,
) -> Result<(StatusCode, Json<ActionResponse<Claim>>), AppError> {
    request.validate()?;
    let building = state.building(&request.building)?;

    let draft = Claim::draft(&request, user, &building);
    let saved = state
        .claims
        .submit(ClaimKind::Expense, draft, files, user)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new(saved, "Expense added successfully")),
    ))
}

pub async fn change_expense_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Json<ActionResponse<Claim>>, AppError> {
    let updated = state
        .transitions
        .change_expense_status(&id, request.status, request.charged_to.as_deref(), &user)
        .await?;

    let message = format!("Expense marked as {}", request.status);
    Ok(Json(ActionResponse::new(updated, message)))
}
