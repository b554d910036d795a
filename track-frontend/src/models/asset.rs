//! Physical assets tracked per building.

use super::claim::positive_amount;
use super::{date_format, flexible_id, non_blank, ResponseEntry, WireEnum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AssetStatus {
    Assigned,
    Unassigned,
    Maintenance,
}

impl WireEnum for AssetStatus {
    const VARIANTS: &'static [Self] = &[Self::Assigned, Self::Unassigned, Self::Maintenance];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Unassigned => "unassigned",
            Self::Maintenance => "maintenance",
        }
    }
}

impl_wire_enum!(AssetStatus, "asset status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AssetCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl WireEnum for AssetCondition {
    const VARIANTS: &'static [Self] = &[Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl_wire_enum!(AssetCondition, "asset condition");

/// Maintenance or assignment event in an asset's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHistoryEntry {
    pub action: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(deserialize_with = "flexible_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub building: String,
    pub status: AssetStatus,
    pub value: Decimal,
    #[serde(with = "date_format")]
    pub purchase_date: NaiveDate,
    pub condition: AssetCondition,
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
    #[serde(default)]
    pub history: Vec<AssetHistoryEntry>,
}

impl Asset {
    /// New asset record; an assigned asset starts its history with the
    /// assignment.
    pub fn draft(request: &NewAssetRequest, building: &str) -> Self {
        let assigned_to = request
            .assigned_to
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let history = match (&assigned_to, request.status) {
            (Some(target), AssetStatus::Assigned) => vec![AssetHistoryEntry {
                action: "assigned".to_string(),
                date: request.purchase_date,
                assigned_to: Some(target.clone()),
                note: None,
            }],
            _ => Vec::new(),
        };

        Self {
            id: String::new(),
            name: request.name.trim().to_string(),
            category: request.category.trim().to_string(),
            assigned_to,
            building: building.to_string(),
            status: request.status,
            value: request.value,
            purchase_date: request.purchase_date,
            condition: request.condition,
            responses: Vec::new(),
            history,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "assignment_matches_status"))]
pub struct NewAssetRequest {
    #[validate(custom(function = "non_blank"))]
    pub name: String,

    #[validate(custom(function = "non_blank"))]
    pub category: String,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[validate(custom(function = "non_blank"))]
    pub building: String,

    pub status: AssetStatus,

    #[validate(custom(function = "non_negative_value"))]
    pub value: Decimal,

    #[serde(with = "date_format")]
    pub purchase_date: NaiveDate,

    pub condition: AssetCondition,
}

fn non_negative_value(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_zero() || positive_amount(value).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("non_negative_value");
        err.message = Some("Value cannot be negative".into());
        Err(err)
    }
}

fn assignment_matches_status(request: &NewAssetRequest) -> Result<(), ValidationError> {
    let has_target = request
        .assigned_to
        .as_deref()
        .is_some_and(|a| !a.trim().is_empty());

    if request.status == AssetStatus::Assigned && !has_target {
        let mut err = ValidationError::new("assigned_to_required");
        err.message = Some("Assigned assets need an assignee".into());
        return Err(err);
    }
    Ok(())
}
