//! Listing and submission of expenses and reimbursements.

use super::attachments::FileUpload;
use super::claim_store::ClaimStore;
use super::expense_client::ExpenseClient;
use super::reimbursement_client::ReimbursementClient;
use crate::models::{Claim, ClaimKind, CurrentUser};
use track_core::error::AppError;

#[derive(Clone)]
pub struct ClaimService {
    pub(crate) expenses: ExpenseClient,
    pub(crate) reimbursements: ReimbursementClient,
    expense_store: ClaimStore,
    reimbursement_store: ClaimStore,
}

impl ClaimService {
    pub fn new(expenses: ExpenseClient, reimbursements: ReimbursementClient) -> Self {
        Self {
            expenses,
            reimbursements,
            expense_store: ClaimStore::default(),
            reimbursement_store: ClaimStore::default(),
        }
    }

    pub fn store(&self, kind: ClaimKind) -> &ClaimStore {
        match kind {
            ClaimKind::Expense => &self.expense_store,
            ClaimKind::Reimbursement => &self.reimbursement_store,
        }
    }

    /// Reloads `kind` from the backend and returns the stored claims,
    /// drafts excluded.
    pub async fn refresh(&self, kind: ClaimKind, caller: &CurrentUser) -> Result<Vec<Claim>, AppError> {
        let fresh = match kind {
            ClaimKind::Expense => self.expenses.list(caller).await?,
            ClaimKind::Reimbursement => self.reimbursements.list(caller).await?,
        };

        tracing::debug!(kind = %kind, count = fresh.len(), "Refreshed claims");

        let store = self.store(kind);
        store.replace_all(fresh).await;
        Ok(store
            .snapshot()
            .await
            .into_iter()
            .filter(|c| !c.is_draft())
            .collect())
    }

    /// Looks the claim up locally, reloading from the backend once if it is
    /// not known yet.
    ///
    /// Drafts still waiting for a backend id are never returned.
    pub async fn find(&self, kind: ClaimKind, id: &str, caller: &CurrentUser) -> Result<Claim, AppError> {
        let not_found = || AppError::NotFound(anyhow::anyhow!("The {} could not be found", kind));

        match self.store(kind).get(id).await {
            Some(claim) if claim.is_draft() => {
                tracing::debug!(kind = %kind, claim_id = %id, "Claim is still a draft");
                return Err(not_found());
            }
            Some(claim) => return Ok(claim),
            None => {}
        }

        self.refresh(kind, caller)
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(not_found)
    }

    /// Posts a draft and swaps it for the backend's record.
    ///
    /// The draft sits in the store under its placeholder id while the
    /// request is in flight and is dropped if the backend refuses it.
    pub async fn submit(
        &self,
        kind: ClaimKind,
        draft: Claim,
        files: Vec<FileUpload>,
        caller: &CurrentUser,
    ) -> Result<Claim, AppError> {
        let store = self.store(kind);
        store.insert_draft(draft.clone()).await;

        let result = match kind {
            ClaimKind::Expense if files.is_empty() => self.expenses.create(&draft, caller).await,
            ClaimKind::Expense => {
                self.expenses
                    .create_with_attachments(&draft, files, caller)
                    .await
            }
            ClaimKind::Reimbursement => self.reimbursements.create(&draft, files, caller).await,
        };

        match result {
            Ok(saved) => {
                store.confirm_draft(&draft.id, saved.clone()).await;
                tracing::info!(
                    kind = %kind,
                    claim_id = %saved.id,
                    user = %caller.user_id,
                    amount = %saved.amount,
                    "Claim submitted"
                );
                Ok(saved)
            }
            Err(e) => {
                store.remove(&draft.id).await;
                tracing::error!(kind = %kind, user = %caller.user_id, error = %e, "Claim submission failed");
                Err(e.into())
            }
        }
    }
}
