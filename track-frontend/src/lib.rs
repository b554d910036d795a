pub mod config;
pub mod filters;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod services;
pub mod startup;

use config::Settings;
use services::{
    AssetClient, BackendClient, BackendError, ClaimService, ComplaintClient, ExpenseClient,
    ReimbursementClient, StatusTransitionHandler,
};
use std::sync::Arc;
use track_core::error::AppError;

/// Shared application state containing the backend resource clients
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub claims: ClaimService,
    pub transitions: StatusTransitionHandler,
    pub complaints: ComplaintClient,
    pub assets: AssetClient,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, BackendError> {
        let backend = Arc::new(BackendClient::new(&settings.backend)?);

        let claims = ClaimService::new(
            ExpenseClient::new(backend.clone()),
            ReimbursementClient::new(backend.clone()),
        );

        Ok(Self {
            settings: Arc::new(settings),
            transitions: StatusTransitionHandler::new(claims.clone()),
            claims,
            complaints: ComplaintClient::new(backend.clone()),
            assets: AssetClient::new(backend),
        })
    }

    /// Configured spelling of `building`, or a 400 for unknown buildings.
    pub fn building(&self, building: &str) -> Result<String, AppError> {
        self.settings
            .canonical_building(building)
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Unknown building: {}", building.trim())))
    }
}
