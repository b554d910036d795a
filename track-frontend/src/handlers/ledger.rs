use crate::ledger::{LedgerQuery, LedgerSummary};
use crate::models::{ClaimKind, CurrentUser};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use track_core::error::AppError;

/// Ledger over expenses. Approved reimbursements are already mirrored there.
pub async fn ledger_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerSummary>, AppError> {
    user.require_reviewer()?;

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "The start date must be on or before the end date"
            )));
        }
    }

    let expenses = state.claims.refresh(ClaimKind::Expense, &user).await?;
    let summary = LedgerSummary::from_claims(expenses.iter().filter(|c| query.includes(c)));

    Ok(Json(summary))
}
