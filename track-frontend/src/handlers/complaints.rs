use crate::filters::{ComplaintFilter, ComplaintQuery};
use crate::models::{
    ActionResponse, ComplaintSuggestion, CurrentUser, FeedbackKind, NewComplaintRequest,
    RespondRequest,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use track_core::error::AppError;
use validator::Validate;

pub async fn list_complaints(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ComplaintQuery>,
) -> Result<Json<Vec<ComplaintSuggestion>>, AppError> {
    let filter = ComplaintFilter::try_from(query)?;
    let items = state.complaints.list(&user).await?;

    Ok(Json(filter.apply(items)))
}

pub async fn create_complaint(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<NewComplaintRequest>,
) -> Result<(StatusCode, Json<ActionResponse<ComplaintSuggestion>>), AppError> {
    request.validate()?;
    let building = state.building(&request.building)?;

    let draft = ComplaintSuggestion::draft(&request, &user, &building);
    let saved = state.complaints.create(&draft, &user).await?;

    tracing::info!(
        complaint_id = %saved.id,
        kind = %saved.kind,
        user = %user.user_id,
        "Feedback submitted"
    );

    let message = match saved.kind {
        FeedbackKind::Complaint => "Complaint submitted successfully",
        FeedbackKind::Suggestion => "Suggestion submitted successfully",
    };
    Ok((StatusCode::CREATED, Json(ActionResponse::new(saved, message))))
}

/// Adds a reviewer reply and/or a new status to a complaint or suggestion.
pub async fn respond_to_complaint(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<ActionResponse<ComplaintSuggestion>>, AppError> {
    user.require_reviewer()?;

    if request.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Please add a response or choose a status"
        )));
    }

    let mut item = state
        .complaints
        .list(&user)
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("The complaint could not be found")))?;

    item.apply_response(&request, &user, Utc::now().date_naive());

    let updated = state.complaints.update(&item, &user).await?.unwrap_or(item);

    tracing::info!(
        complaint_id = %id,
        status = %updated.status,
        reviewer = %user.user_id,
        "Feedback updated"
    );

    Ok(Json(ActionResponse::new(updated, "Response saved")))
}
