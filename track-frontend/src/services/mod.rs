pub mod asset_client;
pub mod attachments;
pub mod backend_client;
pub mod claim_service;
pub mod claim_store;
pub mod complaint_client;
pub mod expense_client;
pub mod metrics;
pub mod reimbursement_client;
pub mod transitions;

pub use asset_client::AssetClient;
pub use attachments::FileUpload;
pub use backend_client::{BackendClient, BackendError};
pub use claim_service::ClaimService;
pub use claim_store::ClaimStore;
pub use complaint_client::ComplaintClient;
pub use expense_client::ExpenseClient;
pub use metrics::{get_metrics, init_metrics};
pub use reimbursement_client::ReimbursementClient;
pub use transitions::{ReimbursementApproval, StatusTransitionHandler};
