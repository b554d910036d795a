//! In-memory claim collections shared across requests.

use crate::models::Claim;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Claims of one kind as last seen from the backend, plus drafts still
/// waiting for the backend to assign an id.
///
/// Locks are held only for the in-memory update, never across a backend
/// call.
#[derive(Clone, Default)]
pub struct ClaimStore {
    claims: Arc<RwLock<Vec<Claim>>>,
}

impl ClaimStore {
    /// Replaces the stored records with a fresh backend listing. Drafts in
    /// flight are kept.
    pub async fn replace_all(&self, fresh: Vec<Claim>) {
        let mut claims = self.claims.write().await;
        let drafts: Vec<Claim> = claims.drain(..).filter(Claim::is_draft).collect();
        *claims = fresh;
        claims.extend(drafts);
    }

    pub async fn snapshot(&self) -> Vec<Claim> {
        self.claims.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Claim> {
        self.claims.read().await.iter().find(|c| c.id == id).cloned()
    }

    pub async fn insert_draft(&self, draft: Claim) {
        debug_assert!(draft.is_draft());
        self.claims.write().await.push(draft);
    }

    /// Swaps the draft for the record the backend created.
    pub async fn confirm_draft(&self, draft_id: &str, saved: Claim) {
        let mut claims = self.claims.write().await;
        claims.retain(|c| c.id != draft_id && c.id != saved.id);
        claims.push(saved);
    }

    /// Replaces the claim with the same id, or appends it.
    pub async fn upsert(&self, claim: Claim) {
        let mut claims = self.claims.write().await;
        match claims.iter_mut().find(|c| c.id == claim.id) {
            Some(existing) => *existing = claim,
            None => claims.push(claim),
        }
    }

    pub async fn remove(&self, id: &str) -> Option<Claim> {
        let mut claims = self.claims.write().await;
        let index = claims.iter().position(|c| c.id == id)?;
        Some(claims.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClaimStatus, DRAFT_PREFIX};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn claim(id: &str, status: ClaimStatus) -> Claim {
        Claim {
            id: id.to_string(),
            name: format!("claim {}", id),
            amount: Decimal::new(100, 0),
            user: "Asha".to_string(),
            building: "Building A".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            category: "Travel".to_string(),
            status,
            charged_to: None,
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn refresh_keeps_drafts_in_flight() {
        let store = ClaimStore::default();
        store.insert_draft(claim(&format!("{}1", DRAFT_PREFIX), ClaimStatus::Pending)).await;
        store.upsert(claim("old", ClaimStatus::Pending)).await;

        store
            .replace_all(vec![claim("1", ClaimStatus::Approved), claim("2", ClaimStatus::Pending)])
            .await;

        let ids: Vec<String> = store.snapshot().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1", "2", "draft-1"]);
    }

    #[tokio::test]
    async fn confirm_draft_swaps_placeholder_for_server_record() {
        let store = ClaimStore::default();
        let draft_id = format!("{}abc", DRAFT_PREFIX);
        store.insert_draft(claim(&draft_id, ClaimStatus::Pending)).await;

        store.confirm_draft(&draft_id, claim("42", ClaimStatus::Pending)).await;

        assert!(store.get(&draft_id).await.is_none());
        assert!(store.get("42").await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = ClaimStore::default();
        store.upsert(claim("7", ClaimStatus::Pending)).await;
        store.upsert(claim("7", ClaimStatus::Rejected)).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("7").await.unwrap().status, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn remove_returns_claim_once() {
        let store = ClaimStore::default();
        store.upsert(claim("9", ClaimStatus::Pending)).await;

        assert!(store.remove("9").await.is_some());
        assert!(store.remove("9").await.is_none());
        assert!(store.is_empty().await);
    }
}
