use crate::config::Settings;
use crate::handlers::{
    assets::{asset_summary, create_asset, list_assets},
    complaints::{create_complaint, list_complaints, respond_to_complaint},
    expenses::{change_expense_status, create_expense, list_expenses, upload_expense},
    health_check,
    ledger::ledger_summary,
    metrics,
    reimbursements::{
        approve_reimbursement, create_reimbursement, list_reimbursements, reject_reimbursement,
    },
};
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use track_core::error::AppError;
use track_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/expenses/upload", post(upload_expense))
        .route("/api/expenses/:id/status", put(change_expense_status))
        .route(
            "/api/reimbursements",
            get(list_reimbursements).post(create_reimbursement),
        )
        .route("/api/reimbursements/:id/approve", post(approve_reimbursement))
        .route("/api/reimbursements/:id/reject", post(reject_reimbursement))
        .route("/api/complaints", get(list_complaints).post(create_complaint))
        .route("/api/complaints/:id", put(respond_to_complaint))
        .route("/api/assets", get(list_assets).post(create_asset))
        .route("/api/assets/summary", get(asset_summary))
        .route("/api/ledger", get(ledger_summary))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    user_id = tracing::field::Empty,
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let address = settings.server.address();

        let state = AppState::new(settings).map_err(|e| {
            tracing::error!("Failed to create backend client: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            backend = %state.settings.backend.base_url,
            "AIIMTrack dashboard listening"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
