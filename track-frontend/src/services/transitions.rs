//! Status decisions on claims.
//!
//! Expenses take a single status update. Approving a reimbursement also
//! records a mirrored expense charged to the chosen cost center, and
//! rejecting one deletes it. Transition rules themselves are enforced by the
//! backend; only the reviewer role is checked here.

use super::claim_service::ClaimService;
use super::metrics::record_transition;
use crate::models::{Claim, ClaimKind, ClaimStatus, CurrentUser, WireEnum};
use serde::Serialize;
use track_core::error::AppError;

/// Both records touched by a reimbursement approval.
#[derive(Debug, Clone, Serialize)]
pub struct ReimbursementApproval {
    pub reimbursement: Claim,
    pub expense: Claim,
}

#[derive(Clone)]
pub struct StatusTransitionHandler {
    claims: ClaimService,
}

fn normalize_charged_to(charged_to: Option<&str>) -> Option<&str> {
    charged_to.map(str::trim).filter(|c| !c.is_empty())
}

impl StatusTransitionHandler {
    pub fn new(claims: ClaimService) -> Self {
        Self { claims }
    }

    /// Applies `status` to an expense and returns the stored result.
    pub async fn change_expense_status(
        &self,
        id: &str,
        status: ClaimStatus,
        charged_to: Option<&str>,
        caller: &CurrentUser,
    ) -> Result<Claim, AppError> {
        caller.require_reviewer()?;

        let current = self.claims.find(ClaimKind::Expense, id, caller).await?;
        let patched = current.with_status(status, normalize_charged_to(charged_to));

        let updated = self
            .claims
            .expenses
            .update(&patched, caller)
            .await?
            .unwrap_or(patched);

        self.claims.store(ClaimKind::Expense).upsert(updated.clone()).await;
        record_transition(ClaimKind::Expense.as_str(), status.as_str());

        tracing::info!(
            claim_id = %id,
            status = %status,
            reviewer = %caller.user_id,
            "Expense status changed"
        );

        Ok(updated)
    }

    /// Approves a reimbursement and files the matching expense.
    ///
    /// If the expense cannot be created the reimbursement stays approved
    /// (the backend already accepted that) and the error is returned.
    pub async fn approve_reimbursement(
        &self,
        id: &str,
        charged_to: &str,
        caller: &CurrentUser,
    ) -> Result<ReimbursementApproval, AppError> {
        caller.require_reviewer()?;

        let charged_to = normalize_charged_to(Some(charged_to)).ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("Please choose who this is charged to"))
        })?;

        let current = self.claims.find(ClaimKind::Reimbursement, id, caller).await?;

        let reimbursement = self
            .claims
            .reimbursements
            .update_status(id, ClaimStatus::Approved, Some(charged_to), caller)
            .await?
            .unwrap_or_else(|| current.with_status(ClaimStatus::Approved, Some(charged_to)));

        self.claims
            .store(ClaimKind::Reimbursement)
            .upsert(reimbursement.clone())
            .await;
        record_transition(ClaimKind::Reimbursement.as_str(), ClaimStatus::Approved.as_str());

        let draft = reimbursement.mirrored_expense(charged_to);
        let expense = self
            .claims
            .submit(ClaimKind::Expense, draft, Vec::new(), caller)
            .await
            .map_err(|e| {
                tracing::error!(
                    reimbursement_id = %id,
                    error = %e,
                    "Reimbursement approved but expense record was not created"
                );
                e
            })?;

        tracing::info!(
            reimbursement_id = %id,
            expense_id = %expense.id,
            charged_to = %charged_to,
            reviewer = %caller.user_id,
            "Reimbursement approved"
        );

        Ok(ReimbursementApproval {
            reimbursement,
            expense,
        })
    }

    /// Rejecting a reimbursement deletes it.
    pub async fn reject_reimbursement(&self, id: &str, caller: &CurrentUser) -> Result<Claim, AppError> {
        caller.require_reviewer()?;

        let current = self.claims.find(ClaimKind::Reimbursement, id, caller).await?;

        self.claims.reimbursements.delete(id, caller).await?;

        let removed = self
            .claims
            .store(ClaimKind::Reimbursement)
            .remove(id)
            .await
            .unwrap_or(current);
        record_transition(ClaimKind::Reimbursement.as_str(), ClaimStatus::Rejected.as_str());

        tracing::info!(reimbursement_id = %id, reviewer = %caller.user_id, "Reimbursement rejected");

        Ok(removed.with_status(ClaimStatus::Rejected, None))
    }
}
