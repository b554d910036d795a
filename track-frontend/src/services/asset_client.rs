use super::backend_client::{BackendClient, BackendError};
use crate::models::{Asset, CurrentUser};
use std::sync::Arc;

const ASSETS_PATH: &str = "assets";

/// `{base}/assets` resource.
#[derive(Clone)]
pub struct AssetClient {
    backend: Arc<BackendClient>,
}

impl AssetClient {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<Asset>, BackendError> {
        self.backend.get_json(ASSETS_PATH, caller).await
    }

    pub async fn create(&self, draft: &Asset, caller: &CurrentUser) -> Result<Asset, BackendError> {
        self.backend.post_json(ASSETS_PATH, draft, caller).await
    }
}
