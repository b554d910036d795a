use super::backend_client::{BackendClient, BackendError};
use crate::models::{ComplaintSuggestion, CurrentUser};
use std::sync::Arc;

const COMPLAINTS_PATH: &str = "ComplaintsSuggestions";

/// `{base}/ComplaintsSuggestions` resource. Updates go to the collection
/// path with the id in the body.
#[derive(Clone)]
pub struct ComplaintClient {
    backend: Arc<BackendClient>,
}

impl ComplaintClient {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<ComplaintSuggestion>, BackendError> {
        self.backend.get_json(COMPLAINTS_PATH, caller).await
    }

    pub async fn create(
        &self,
        draft: &ComplaintSuggestion,
        caller: &CurrentUser,
    ) -> Result<ComplaintSuggestion, BackendError> {
        self.backend.post_json(COMPLAINTS_PATH, draft, caller).await
    }

    pub async fn update(
        &self,
        item: &ComplaintSuggestion,
        caller: &CurrentUser,
    ) -> Result<Option<ComplaintSuggestion>, BackendError> {
        self.backend.put_json(COMPLAINTS_PATH, item, caller).await
    }
}
