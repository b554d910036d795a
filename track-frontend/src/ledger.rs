//! Reporting totals over claims and assets.

use crate::models::{Asset, AssetStatus, Claim, ClaimStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket used for approved claims without a cost center.
pub const UNASSIGNED_BUCKET: &str = "unassigned";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusTotal {
    pub count: usize,
    pub amount: Decimal,
}

/// Aggregated view of a set of claims.
///
/// Only approved claims count towards the building, category, charged-to
/// and month breakdowns. Pending claims are reported as exposure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub by_status: BTreeMap<ClaimStatus, StatusTotal>,
    pub approved_total: Decimal,
    pub pending_total: Decimal,
    pub by_building: BTreeMap<String, Decimal>,
    pub by_category: BTreeMap<String, Decimal>,
    pub by_charged_to: BTreeMap<String, Decimal>,
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, Decimal>,
}

/// Restricts which claims enter the ledger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    pub building: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl LedgerQuery {
    pub fn includes(&self, claim: &Claim) -> bool {
        let building = self
            .building
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty() && !b.eq_ignore_ascii_case(crate::filters::ALL))
            .map_or(true, |b| b.eq_ignore_ascii_case(&claim.building));

        building
            && self.from.map_or(true, |from| claim.date >= from)
            && self.to.map_or(true, |to| claim.date <= to)
    }
}

impl LedgerSummary {
    pub fn from_claims<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> Self {
        let mut summary = Self::default();

        for claim in claims {
            let status = summary.by_status.entry(claim.status).or_default();
            status.count += 1;
            status.amount += claim.amount;

            match claim.status {
                ClaimStatus::Approved => summary.add_approved(claim),
                ClaimStatus::Pending => summary.pending_total += claim.amount,
                ClaimStatus::Rejected => {}
            }
        }

        summary
    }

    fn add_approved(&mut self, claim: &Claim) {
        self.approved_total += claim.amount;

        *self.by_building.entry(claim.building.clone()).or_default() += claim.amount;
        *self.by_category.entry(claim.category.clone()).or_default() += claim.amount;

        let charged_to = claim
            .charged_to
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNASSIGNED_BUCKET);
        *self.by_charged_to.entry(charged_to.to_string()).or_default() += claim.amount;

        let month = claim.date.format("%Y-%m").to_string();
        *self.by_month.entry(month).or_default() += claim.amount;
    }
}

/// Asset counts and book value for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetSummary {
    pub total: usize,
    pub total_value: Decimal,
    pub by_status: BTreeMap<AssetStatus, usize>,
    pub value_by_building: BTreeMap<String, Decimal>,
}

impl AssetSummary {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let mut summary = Self::default();

        for asset in assets {
            summary.total += 1;
            summary.total_value += asset.value;
            *summary.by_status.entry(asset.status).or_default() += 1;
            *summary
                .value_by_building
                .entry(asset.building.clone())
                .or_default() += asset.value;
        }

        summary
    }
}
