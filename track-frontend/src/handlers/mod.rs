pub mod assets;
pub mod complaints;
pub mod expenses;
pub mod health;
pub mod ledger;
pub mod multipart;
pub mod reimbursements;

pub use health::{health_check, metrics};

use crate::models::{Claim, CurrentUser};

/// Employees only see claims they filed; reviewers see everything.
pub(crate) fn visible_to(claims: Vec<Claim>, user: &CurrentUser) -> Vec<Claim> {
    if user.can_review() {
        claims
    } else {
        claims.into_iter().filter(|c| c.belongs_to(user)).collect()
    }
}
