use super::attachments::{claim_form, FileUpload};
use super::backend_client::{BackendClient, BackendError};
use crate::models::{Claim, ClaimStatus, CurrentUser};
use serde::Serialize;
use std::sync::Arc;

const REIMBURSEMENT_PATH: &str = "Asset/reimbursements";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdate<'a> {
    status: ClaimStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    charged_to: Option<&'a str>,
}

/// `{base}/Asset/reimbursements` resource.
#[derive(Clone)]
pub struct ReimbursementClient {
    backend: Arc<BackendClient>,
}

impl ReimbursementClient {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<Claim>, BackendError> {
        self.backend.get_json(REIMBURSEMENT_PATH, caller).await
    }

    /// Reimbursements are always filed as multipart, receipts or not.
    pub async fn create(
        &self,
        draft: &Claim,
        files: Vec<FileUpload>,
        caller: &CurrentUser,
    ) -> Result<Claim, BackendError> {
        self.backend
            .post_multipart(REIMBURSEMENT_PATH, claim_form(draft, files), caller)
            .await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: ClaimStatus,
        charged_to: Option<&str>,
        caller: &CurrentUser,
    ) -> Result<Option<Claim>, BackendError> {
        let path = format!("{}/{}/status", REIMBURSEMENT_PATH, id);
        let body = StatusUpdate { status, charged_to };
        self.backend.put_json(&path, &body, caller).await
    }

    pub async fn delete(&self, id: &str, caller: &CurrentUser) -> Result<(), BackendError> {
        let path = format!("{}/{}", REIMBURSEMENT_PATH, id);
        self.backend.delete(&path, caller).await
    }
}
