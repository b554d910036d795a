use super::attachments::{claim_form, FileUpload};
use super::backend_client::{BackendClient, BackendError};
use crate::models::{Claim, CurrentUser};
use std::sync::Arc;

const EXPENSE_PATH: &str = "Expense";

/// `{base}/Expense` resource.
#[derive(Clone)]
pub struct ExpenseClient {
    backend: Arc<BackendClient>,
}

impl ExpenseClient {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<Claim>, BackendError> {
        self.backend.get_json(EXPENSE_PATH, caller).await
    }

    /// Creates an expense; the returned record carries the backend id.
    pub async fn create(&self, draft: &Claim, caller: &CurrentUser) -> Result<Claim, BackendError> {
        self.backend.post_json(EXPENSE_PATH, draft, caller).await
    }

    pub async fn create_with_attachments(
        &self,
        draft: &Claim,
        files: Vec<FileUpload>,
        caller: &CurrentUser,
    ) -> Result<Claim, BackendError> {
        self.backend
            .post_multipart(EXPENSE_PATH, claim_form(draft, files), caller)
            .await
    }

    /// Sends the full updated record; `None` when the backend does not echo it.
    pub async fn update(&self, claim: &Claim, caller: &CurrentUser) -> Result<Option<Claim>, BackendError> {
        let path = format!("{}/{}", EXPENSE_PATH, claim.id);
        self.backend.put_json(&path, claim, caller).await
    }
}
