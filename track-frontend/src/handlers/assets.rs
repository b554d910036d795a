use crate::filters::{AssetFilter, AssetQuery};
use crate::ledger::AssetSummary;
use crate::models::{ActionResponse, Asset, CurrentUser, NewAssetRequest};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use track_core::error::AppError;
use validator::Validate;

pub async fn list_assets(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<AssetQuery>,
) -> Result<Json<Vec<Asset>>, AppError> {
    let filter = AssetFilter::try_from(query)?;
    let assets = state.assets.list(&user).await?;

    Ok(Json(filter.apply(assets)))
}

/// Totals over the filtered asset list.
pub async fn asset_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<AssetQuery>,
) -> Result<Json<AssetSummary>, AppError> {
    let filter = AssetFilter::try_from(query)?;
    let assets = filter.apply(state.assets.list(&user).await?);

    Ok(Json(AssetSummary::from_assets(&assets)))
}

pub async fn create_asset(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<NewAssetRequest>,
) -> Result<(StatusCode, Json<ActionResponse<Asset>>), AppError> {
    user.require_reviewer()?;
    request.validate()?;
    let building = state.building(&request.building)?;

    let saved = state
        .assets
        .create(&Asset::draft(&request, &building), &user)
        .await?;

    tracing::info!(asset_id = %saved.id, building = %saved.building, "Asset registered");

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new(saved, "Asset added successfully")),
    ))
}
